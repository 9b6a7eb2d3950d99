//! Input coercion and validation
//!
//! The two positional inputs are deliberately treated differently: a bad
//! worker count is corrected to 1 with a warning, while a bad interval count
//! is a fatal input error.

use super::*;
use crate::config::cli::{Cli, ExecutionMode};
use crate::error::Error;
use tracing::warn;

/// Build the run configuration from parsed CLI arguments
pub fn build_config(cli: &Cli) -> crate::Result<Config> {
    let intervals = match cli.intervals.as_deref() {
        Some(raw) => parse_intervals(raw)?,
        None => DEFAULT_INTERVALS,
    };

    let workers = match cli.workers.as_deref() {
        Some(raw) => coerce_workers(raw),
        None => DEFAULT_WORKERS,
    };

    let mode = match cli.mode {
        ExecutionMode::Parallel => RunMode::Parallel,
        ExecutionMode::Sequential => RunMode::Sequential,
    };

    Ok(Config {
        intervals,
        workers,
        mode,
        output: OutputConfig {
            format: if cli.json { OutputFormat::Json } else { OutputFormat::Text },
            per_worker: cli.per_worker,
        },
        runtime: RuntimeConfig {
            pin_workers: cli.pin_workers,
            worker_stack_size: cli.stack_size,
        },
    })
}

/// Parse the worker count, falling back to 1 for anything non-positive or non-numeric
pub fn coerce_workers(raw: &str) -> usize {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => usize::try_from(value).unwrap_or(usize::MAX),
        Ok(value) => {
            warn!("invalid worker count ({}), using 1 worker", value);
            1
        }
        Err(_) => {
            warn!("invalid worker count ({:?}), using 1 worker", raw);
            1
        }
    }
}

/// Parse and range-check the number of subintervals
pub fn parse_intervals(raw: &str) -> crate::Result<u64> {
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|_| Error::invalid_intervals(raw))?;
    validate_intervals(value)
}

/// Check that `value` lies in `1..=MAX_INTERVALS`
pub fn validate_intervals(value: i64) -> crate::Result<u64> {
    match u64::try_from(value) {
        Ok(n) if (1..=MAX_INTERVALS).contains(&n) => Ok(n),
        _ => Err(Error::invalid_intervals(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_validate_intervals_bounds() {
        assert_eq!(validate_intervals(1).unwrap(), 1);
        assert_eq!(validate_intervals(2_147_483_647).unwrap(), 2_147_483_647);
        assert!(validate_intervals(0).is_err());
        assert!(validate_intervals(-5).is_err());
        assert!(validate_intervals(1 << 31).is_err());
    }

    #[test]
    fn test_parse_intervals_rejects_text() {
        let err = parse_intervals("lots").unwrap_err();
        assert!(err.is_input_error());
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_parse_intervals_rejects_overflowing_text() {
        assert!(parse_intervals("99999999999999999999999").is_err());
    }

    #[test]
    fn test_coerce_workers() {
        assert_eq!(coerce_workers("8"), 8);
        assert_eq!(coerce_workers(" 3 "), 3);
        assert_eq!(coerce_workers("0"), 1);
        assert_eq!(coerce_workers("-3"), 1);
        assert_eq!(coerce_workers("many"), 1);
    }

    #[test]
    fn test_build_config_defaults() {
        let cli = Cli::try_parse_from(["pipulse"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.intervals, DEFAULT_INTERVALS);
        assert_eq!(config.mode, RunMode::Parallel);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_build_config_coerces_workers_but_rejects_intervals() {
        let cli = Cli::try_parse_from(["pipulse", "0", "1000"]).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.workers, 1);
        assert_eq!(config.intervals, 1000);

        let cli = Cli::try_parse_from(["pipulse", "4", "0"]).unwrap();
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn test_build_config_output_and_runtime() {
        let cli = Cli::try_parse_from([
            "pipulse", "2", "10", "--json", "--per-worker", "--pin-workers", "--stack-size", "65536",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.per_worker);
        assert!(config.runtime.pin_workers);
        assert_eq!(config.runtime.worker_stack_size, Some(65536));
    }
}
