use crate::constants::*;
use serde::{Deserialize, Serialize};

/// A scan footprint: which cells around the agent a single scan reveals.
pub trait Sensor {
    fn name(&self) -> &str;

    /// Offsets `(row, col)` relative to the scanned position.
    fn footprint(&self) -> &[(i8, i8)];
}

/// The two fixed sensor shapes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SensorProfile {
    /// The eight surrounding cells.
    #[default]
    Adjacent,
    /// The eight surrounding cells plus the cells two steps away along each axis.
    Extended,
}

impl Sensor for SensorProfile {
    fn name(&self) -> &str {
        match self {
            SensorProfile::Adjacent => "adjacent",
            SensorProfile::Extended => "extended",
        }
    }

    fn footprint(&self) -> &[(i8, i8)] {
        match self {
            SensorProfile::Adjacent => &ADJACENT_FOOTPRINT,
            SensorProfile::Extended => &EXTENDED_FOOTPRINT,
        }
    }
}
