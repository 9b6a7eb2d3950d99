//! pipulse CLI entry point

use anyhow::{Context, Result};
use pipulse::config::cli::Cli;
use pipulse::config::{validator, Config, RunMode, REFERENCE_PI};
use pipulse::coordinator::{ComputationRequest, Coordinator};
use pipulse::integrate::sequential_pi;
use pipulse::output::{self, RunSummary};
use pipulse::util::time::timed;
use pipulse::worker::affinity;
use tracing::debug;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    setup_logging(cli.verbose, cli.quiet);

    let config = match validator::build_config(&cli) {
        Ok(config) => config,
        Err(e) if e.is_input_error() => {
            eprintln!("{}", Cli::usage());
            return Err(e).context("invalid arguments");
        }
        Err(e) => return Err(e.into()),
    };
    debug!("configuration: {:?}", config);

    match config.mode {
        RunMode::Parallel => run_parallel(&config),
        RunMode::Sequential => run_sequential(&config),
    }
}

/// Partitioned fork-join run over `config.workers` threads
fn run_parallel(config: &Config) -> Result<()> {
    affinity::warn_if_oversubscribed(config.workers);

    let request = ComputationRequest::from_config(config)?;
    let coordinator = Coordinator::from_config(config);

    let (result, elapsed) = timed(|| coordinator.compute(&request));
    let result = result.context("parallel computation aborted")?;

    if result.is_degraded() {
        debug!(
            "{} of {} workers missing from the result",
            result.workers - result.stats.successful(),
            result.workers
        );
    }

    output::print_summary(&RunSummary {
        config,
        approximation: result.approximation,
        reference: REFERENCE_PI,
        elapsed,
        stats: Some(&result.stats),
    })?;
    Ok(())
}

/// Midpoint rule on the main thread only
fn run_sequential(config: &Config) -> Result<()> {
    let (approximation, elapsed) = timed(|| sequential_pi(config.intervals));

    output::print_summary(&RunSummary {
        config,
        approximation,
        reference: REFERENCE_PI,
        elapsed,
        stats: None,
    })?;
    Ok(())
}

/// Diagnostics go to stderr; the filter comes only from -v/-q
fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = match verbose {
        0 => tracing_subscriber::EnvFilter::new("warn"),
        1 => tracing_subscriber::EnvFilter::new("info"),
        2 => tracing_subscriber::EnvFilter::new("debug"),
        _ => tracing_subscriber::EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
