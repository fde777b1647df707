//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use sb_core::RawConfig;

/// Simulate a ski-resort shuttle bus and its skiers.
///
/// Every lifecycle event is written, numbered, to the output file (and
/// echoed to stdout unless `--quiet`).
#[derive(Parser, Debug)]
#[command(version, about, allow_negative_numbers = true)]
pub struct Args {
    /// Number of skiers (1..=20000).
    pub skiers: i64,

    /// Number of bus stops (1..=10).
    pub stops: i64,

    /// Bus capacity (10..=100).
    pub capacity: i64,

    /// Maximum time a skier spends at breakfast, in microseconds (0..=10000).
    pub max_skier_wait: i64,

    /// Maximum bus travel time between two stops, in microseconds (0..=1000).
    pub max_bus_travel: i64,

    /// Event log file.
    #[arg(short, long, default_value = "proj2.out")]
    pub output: PathBuf,

    /// Also export events as CSV to this path.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// RNG seed; drawn at random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Do not echo the event log to stdout.
    #[arg(short, long)]
    pub quiet: bool,

    /// Diagnostic verbosity on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn raw_config(&self, seed: u64) -> RawConfig {
        RawConfig {
            num_skiers:        self.skiers,
            num_stops:         self.stops,
            bus_capacity:      self.capacity,
            max_skier_wait_us: self.max_skier_wait,
            max_bus_travel_us: self.max_bus_travel,
            seed,
        }
    }
}
