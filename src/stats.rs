//! Timing harness: run every engine and sensor over many random maps.

use crate::config::*;
use crate::map::*;
use crate::search::*;
use crate::sensor::*;
use fnv::FnvHashMap;
use itertools::Itertools;
use log::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::time::{Duration, Instant};

/// One engine paired with one sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variant {
    pub algorithm: Algorithm,
    pub sensor: SensorProfile,
}

impl Variant {
    pub fn all() -> impl Iterator<Item = Variant> {
        Algorithm::ALL
            .into_iter()
            .cartesian_product([SensorProfile::Adjacent, SensorProfile::Extended])
            .map(|(algorithm, sensor)| Variant { algorithm, sensor })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} sensor)", self.algorithm.name(), self.sensor.name())
    }
}

/// Raw samples collected for one variant.
#[derive(Clone, Debug, Default)]
pub struct Samples {
    times: Vec<Duration>,
    wins: usize,
}

impl Samples {
    pub fn record(&mut self, elapsed: Duration, won: bool) {
        self.times.push(elapsed);
        if won {
            self.wins += 1;
        }
    }

    pub fn summarize(&self, variant: Variant) -> Summary {
        let millis: Vec<f64> = self.times.iter().map(|t| t.as_secs_f64() * 1000.0).collect();
        let trials = millis.len();
        Summary {
            variant,
            trials,
            mean_ms: mean(&millis),
            mode_ms: mode(&self.times),
            median_ms: median(&millis),
            std_dev_ms: sample_std_dev(&millis),
            wins: self.wins,
            losses: trials - self.wins,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub variant: Variant,
    pub trials: usize,
    pub mean_ms: f64,
    pub mode_ms: f64,
    pub median_ms: f64,
    pub std_dev_ms: f64,
    pub wins: usize,
    pub losses: usize,
}

impl Summary {
    fn percent(&self, count: usize) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            count as f64 / self.trials as f64 * 100.0
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} results:", self.variant)?;
        writeln!(f, "\tMean: {:.6} ms", self.mean_ms)?;
        writeln!(f, "\tMode: {:.6} ms", self.mode_ms)?;
        writeln!(f, "\tMedian: {:.6} ms", self.median_ms)?;
        writeln!(f, "\tStandard deviation: {:.6} ms", self.std_dev_ms)?;
        writeln!(f, "\tNumber of wins: {}", self.wins)?;
        writeln!(f, "\tNumber of losses: {}", self.losses)?;
        writeln!(f, "\tPercent of wins: {:.2}%", self.percent(self.wins))?;
        writeln!(f, "\tPercent of losses: {:.2}%", self.percent(self.losses))
    }
}

/// Run `config.trials` random maps through one variant.
pub fn run_variant(variant: Variant, config: &StatsConfig, rng: &mut StdRng) -> Summary {
    let search = config.search(variant.sensor);
    let mut samples = Samples::default();

    for trial in 0..config.trials {
        let map = match generate(rng) {
            Ok(map) => map,
            Err(err) => {
                warn!("Trial {} skipped: {}", trial, err);
                continue;
            }
        };
        let started = Instant::now();
        let outcome = run_search(variant.algorithm, &map, &search);
        samples.record(started.elapsed(), outcome.is_win());
    }

    let summary = samples.summarize(variant);
    info!(
        "{}: {} wins / {} trials, mean {:.3} ms",
        variant, summary.wins, summary.trials, summary.mean_ms
    );
    summary
}

/// Run every variant. Each variant draws its maps from its own generator
/// seeded from `config.seed`, so variants see the same sequence of maps.
pub fn run_all(config: &StatsConfig) -> Vec<Summary> {
    let seed = config.seed.unwrap_or_else(rand::random);
    debug!("Statistics seed {}", seed);

    Variant::all()
        .map(|variant| {
            let mut rng = StdRng::seed_from_u64(seed);
            run_variant(variant, config, &mut rng)
        })
        .collect()
}

/// Full statistics text.
pub fn render(summaries: &[Summary]) -> String {
    let body = summaries.iter().map(|summary| summary.to_string()).join("\n");
    format!("Total statistics:\n\n{}", body)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Most frequent time at microsecond resolution; ties go to the shortest.
fn mode(times: &[Duration]) -> f64 {
    let mut counts: FnvHashMap<u128, usize> = FnvHashMap::default();
    for time in times {
        *counts.entry(time.as_micros()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(a_time, a_count), (b_time, b_count)| {
            a_count.cmp(b_count).then_with(|| b_time.cmp(a_time))
        })
        .map_or(0.0, |(micros, _)| micros as f64 / 1000.0)
}

fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sorted: Vec<f64> = values.iter().copied().sorted_by(|a, b| a.total_cmp(b)).collect();
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    } else {
        sorted[middle]
    }
}

fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (squares / (values.len() - 1) as f64).sqrt()
}
