use crate::constants::*;
use crate::sensor::*;
use serde::{Deserialize, Serialize};

/// Knobs for a single search run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub sensor: SensorProfile,
    /// Longest route, in steps, the backtracking engine will descend to.
    #[serde(default = "default_depth_cap")]
    pub depth_cap: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            sensor: SensorProfile::default(),
            depth_cap: default_depth_cap(),
        }
    }
}

impl SearchConfig {
    pub fn with_sensor(sensor: SensorProfile) -> Self {
        SearchConfig {
            sensor,
            ..SearchConfig::default()
        }
    }
}

fn default_depth_cap() -> u32 {
    MAX_BRANCH_DEPTH
}

/// Settings for the timing harness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Fixed seed for reproducible runs; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Passed to every variant; the sensor comes from the variant itself.
    #[serde(default = "default_depth_cap")]
    pub depth_cap: u32,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            trials: default_trials(),
            seed: None,
            depth_cap: default_depth_cap(),
        }
    }
}

impl StatsConfig {
    /// Search settings for one variant of the harness.
    pub fn search(&self, sensor: SensorProfile) -> SearchConfig {
        SearchConfig {
            sensor,
            depth_cap: self.depth_cap,
        }
    }
}

fn default_trials() -> usize {
    DEFAULT_TRIALS
}
