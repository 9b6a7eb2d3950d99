//! CLI argument parsing using clap

use clap::{ArgAction, CommandFactory, Parser, ValueEnum};

/// Execution mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExecutionMode {
    /// Split the integration domain across H worker threads (default)
    Parallel,
    /// Integrate on the main thread only; H is ignored
    Sequential,
}

/// pipulse - parallel midpoint integration of pi
///
/// Approximates pi as the integral of 4 / (1 + x^2) over [0, 1], splitting
/// the n subintervals across H worker threads.
#[derive(Parser, Debug)]
#[command(name = "pipulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Number of worker threads H (non-positive or non-numeric values fall back to 1)
    ///
    /// Kept as raw text so that invalid values can be coerced instead of rejected.
    #[arg(value_name = "H", allow_negative_numbers = true)]
    pub workers: Option<String>,

    /// Number of subintervals n (1 to 2147483647)
    #[arg(value_name = "N", allow_negative_numbers = true)]
    pub intervals: Option<String>,

    /// Execution mode
    #[arg(long, value_enum, default_value = "parallel")]
    pub mode: ExecutionMode,

    /// Print a JSON report instead of text
    #[arg(long)]
    pub json: bool,

    /// Show per-worker ranges, partial sums and timings
    #[arg(long)]
    pub per_worker: bool,

    /// Pin worker k to CPU core (k mod number of cores)
    #[arg(long)]
    pub pin_workers: bool,

    /// Stack size for worker threads in bytes
    #[arg(long, value_name = "BYTES")]
    pub stack_size: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all diagnostics, including warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Usage text printed alongside fatal input errors
    pub fn usage() -> String {
        let mut cmd = Self::command();
        let bin = cmd.get_name().to_string();
        format!(
            "{}\n\n  {bin}          -> H = {}, n = {}\n  {bin} H        -> H threads, default n\n  {bin} H n      -> H threads and n subintervals",
            cmd.render_usage(),
            crate::config::DEFAULT_WORKERS,
            crate::config::DEFAULT_INTERVALS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positionals_are_optional() {
        let cli = Cli::try_parse_from(["pipulse"]).unwrap();
        assert!(cli.workers.is_none());
        assert!(cli.intervals.is_none());
        assert_eq!(cli.mode, ExecutionMode::Parallel);
    }

    #[test]
    fn test_negative_positionals_are_accepted_as_text() {
        let cli = Cli::try_parse_from(["pipulse", "-3", "-5"]).unwrap();
        assert_eq!(cli.workers.as_deref(), Some("-3"));
        assert_eq!(cli.intervals.as_deref(), Some("-5"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "pipulse", "8", "1000", "--mode", "sequential", "--json", "-vv", "--pin-workers",
        ])
        .unwrap();
        assert_eq!(cli.workers.as_deref(), Some("8"));
        assert_eq!(cli.intervals.as_deref(), Some("1000"));
        assert_eq!(cli.mode, ExecutionMode::Sequential);
        assert!(cli.json);
        assert!(cli.pin_workers);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["pipulse", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_usage_mentions_defaults() {
        let usage = Cli::usage();
        assert!(usage.contains("H = 4"));
        assert!(usage.contains("n = 2000000000"));
    }
}
