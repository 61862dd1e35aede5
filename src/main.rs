//! Command line front end.
//!
//! Usage:
//!   haven-search file scenario.txt
//!   haven-search random --seed 42 --sensor extended
//!   haven-search stats --trials 500
//!
//! Reports are written to `--output` (default: current directory). Set
//! `RUST_LOG=debug` to see per-sub-problem search summaries.

use clap::{Parser, Subcommand};
use haven_search::config::*;
use haven_search::constants::*;
use haven_search::map::*;
use haven_search::report::Report;
use haven_search::search::*;
use haven_search::sensor::SensorProfile;
use haven_search::stats;
use log::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest safe route search on a 9x9 grid", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Sensor used by the agent
    #[arg(long, value_enum, default_value_t = SensorProfile::Adjacent, global = true)]
    sensor: SensorProfile,

    /// Maximum route length for the backtracking engine
    #[arg(long, default_value_t = MAX_BRANCH_DEPTH, global = true)]
    depth_cap: u32,

    /// Directory reports are written to
    #[arg(short, long, default_value = ".", global = true)]
    output: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search a map read from a scenario file
    File { path: PathBuf },
    /// Search a randomly generated map
    Random {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Time every engine and sensor over many random maps
    Stats {
        #[arg(long, default_value_t = DEFAULT_TRIALS)]
        trials: usize,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    fs::create_dir_all(&args.output)?;
    let search = SearchConfig {
        sensor: args.sensor,
        depth_cap: args.depth_cap,
    };

    match args.command {
        Command::File { path } => {
            let text = fs::read_to_string(&path)?;
            let map = parse_map(&text).map_err(|err| {
                warn!("Rejected scenario {}: {}", path.display(), err);
                err
            })?;
            run_and_report(&map, &search, &args.output)?;
        }
        Command::Random { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let map = GameMap::generate(&mut rng)?;
            info!("Generated scenario {}", map.placements().to_scenario());
            run_and_report(&map, &search, &args.output)?;
        }
        Command::Stats { trials, seed } => {
            let summaries = stats::run_all(&StatsConfig {
                trials,
                seed,
                depth_cap: args.depth_cap,
            });
            let path = args.output.join("output_statistics.txt");
            fs::write(&path, stats::render(&summaries))?;
            info!("Wrote {}", path.display());
        }
    }

    Ok(())
}

fn run_and_report(map: &GameMap, search: &SearchConfig, output: &Path) -> std::io::Result<()> {
    for algorithm in Algorithm::ALL {
        let started = Instant::now();
        let outcome = run_search(algorithm, map, search);
        let report = Report::new(map, outcome, started.elapsed());

        let path = output.join(format!("output_{}.txt", algorithm.name()));
        fs::write(&path, report.to_string())?;

        if report.outcome().is_win() {
            info!(
                "{}: win in {} steps ({} ms)",
                algorithm.name(),
                report.outcome().steps(),
                report.elapsed().as_millis()
            );
        } else {
            info!("{}: lose", algorithm.name());
        }
    }
    Ok(())
}
