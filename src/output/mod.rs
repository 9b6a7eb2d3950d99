//! Result reporting
//!
//! Text output reproduces the classic configuration/approximation/error/time
//! report; JSON output carries the same data plus per-worker detail.

pub mod json;
pub mod text;

use crate::config::{Config, OutputFormat, RunMode};
use crate::stats::RunStats;
use crate::Result;
use std::time::Duration;

/// Everything a report needs about one finished run
#[derive(Debug, Clone, Copy)]
pub struct RunSummary<'a> {
    pub config: &'a Config,
    pub approximation: f64,
    /// Value the approximation is compared against
    pub reference: f64,
    pub elapsed: Duration,
    /// Worker reports (parallel mode only)
    pub stats: Option<&'a RunStats>,
}

impl RunSummary<'_> {
    pub fn absolute_error(&self) -> f64 {
        (self.approximation - self.reference).abs()
    }

    pub fn timing_label(&self) -> &'static str {
        match self.config.mode {
            RunMode::Parallel => "Parallel time (s)",
            RunMode::Sequential => "Sequential time (s)",
        }
    }
}

/// Print the summary in the configured format
pub fn print_summary(summary: &RunSummary) -> Result<()> {
    match summary.config.output.format {
        OutputFormat::Text => {
            text::print_results(summary);
            Ok(())
        }
        OutputFormat::Json => json::print_json(summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::REFERENCE_PI;

    #[test]
    fn test_absolute_error_and_label() {
        let config = Config::default();
        let summary = RunSummary {
            config: &config,
            approximation: 3.2,
            reference: REFERENCE_PI,
            elapsed: Duration::from_millis(1),
            stats: None,
        };
        assert!((summary.absolute_error() - 0.058407346410207).abs() < 1e-12);
        assert_eq!(summary.timing_label(), "Parallel time (s)");

        let sequential = Config {
            mode: RunMode::Sequential,
            ..Config::default()
        };
        let summary = RunSummary {
            config: &sequential,
            ..summary
        };
        assert_eq!(summary.timing_label(), "Sequential time (s)");
    }
}
