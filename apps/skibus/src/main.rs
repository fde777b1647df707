//! skibus — ski-resort shuttle bus simulation.
//!
//! ```text
//! skibus <SKIERS> <STOPS> <CAPACITY> <MAX_SKIER_WAIT_US> <MAX_BUS_TRAVEL_US>
//!        [--output proj2.out] [--csv events.csv] [--seed N] [--quiet] [-v...]
//! ```
//!
//! Exit status: 0 when every skier went skiing; 1 on a configuration error,
//! a resource failure, or an interrupt (after cleanup).

mod cli;
mod signal;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use sb_core::SimConfig;
use sb_output::{CsvSink, TextSink, Tee};
use sb_sim::{AbortFlag, Launcher};
use sb_state::EventSink;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Args;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    // Validate before touching any resource.
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = SimConfig::new(args.raw_config(seed))?;
    info!(seed, "configuration accepted");

    let abort = AbortFlag::new();
    signal::install(abort.clone()).context("failed to install signal handlers")?;

    let sink = open_sinks(&args)?;
    let outcome = Launcher::new(config, sink).abort_flag(abort).run()?;

    info!(
        actions = outcome.actions,
        skiers  = outcome.skiers.len(),
        log     = %args.output.display(),
        "all skiers went skiing"
    );
    Ok(())
}

/// Open the text log (and the CSV export, if requested).
fn open_sinks(args: &Args) -> Result<Box<dyn EventSink>> {
    let text = TextSink::create(&args.output)
        .with_context(|| format!("cannot open output file {}", args.output.display()))?;
    let text = if args.quiet { text } else { text.mirrored() };

    let Some(csv_path) = &args.csv else {
        return Ok(Box::new(text));
    };
    let csv = CsvSink::create(csv_path)
        .with_context(|| format!("cannot open CSV file {}", csv_path.display()))?;
    Ok(Box::new(Tee::new(text, csv)))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
