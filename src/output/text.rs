//! Human-readable text output

use super::RunSummary;
use crate::config::RunMode;
use crate::stats::RunStats;
use crate::util::time::{calculate_rate, format_duration, format_rate};
use std::fmt;

/// Print run results to stdout
pub fn print_results(summary: &RunSummary) {
    print!("{}", summary);
}

/// Render the configuration echo, the approximation, its error and timing
///
/// The worker table is appended when per-worker output is enabled and the
/// run produced worker reports.
pub fn render_results(summary: &RunSummary) -> String {
    summary.to_string()
}

/// Per-worker table: range, status, partial sum, time and evaluation rate
pub fn render_workers(stats: &RunStats) -> String {
    WorkerTable(stats).to_string()
}

impl fmt::Display for RunSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let config = self.config;

        writeln!(f)?;
        writeln!(f, "Configuration:")?;
        writeln!(f, "  n (subintervals) = {}", config.intervals)?;
        if config.mode == RunMode::Parallel {
            writeln!(f, "  H (threads)      = {}", config.workers)?;
        }

        writeln!(f)?;
        writeln!(f, "pi approximation      = {:.20}", self.approximation)?;
        writeln!(f, "Absolute error        = {:.20}", self.absolute_error())?;
        writeln!(
            f,
            "{:<22}= {:.6}",
            self.timing_label(),
            self.elapsed.as_secs_f64()
        )?;

        match self.stats {
            Some(stats) if config.output.per_worker => write!(f, "{}", WorkerTable(stats)),
            _ => Ok(()),
        }
    }
}

/// Display adapter for the per-worker table
pub struct WorkerTable<'a>(pub &'a RunStats);

impl fmt::Display for WorkerTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let stats = self.0;

        writeln!(f)?;
        writeln!(f, "Workers:")?;
        writeln!(
            f,
            "  {:>4}  {:>23}  {:<8}  {:>24}  {:>10}  {:>10}",
            "id", "range", "status", "partial sum", "time", "evals/s"
        )?;
        for report in stats.reports() {
            let partial = report
                .partial_sum
                .map(|sum| format!("{:.12}", sum))
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                f,
                "  {:>4}  {:>23}  {:<8}  {:>24}  {:>10}  {:>10}",
                report.worker_id,
                format!("[{}, {})", report.start, report.end),
                report.status.label(),
                partial,
                format_duration(report.elapsed),
                format_rate(calculate_rate(report.iterations, report.elapsed)),
            )?;
        }

        writeln!(
            f,
            "  {} of {} workers reported, load imbalance {:.2}",
            stats.successful(),
            stats.workers(),
            stats.imbalance()
        )
    }
}
