//! JSON output formatting
//!
//! Serializes a run summary with:
//! - The effective configuration
//! - Approximation, reference value and absolute error
//! - Wall time (seconds + human-readable)
//! - Per-worker detail for parallel runs

use super::RunSummary;
use crate::config::Config;
use crate::stats::{RunStats, WorkerStatus};
use crate::util::time::format_duration;
use crate::Result;
use serde::Serialize;
use std::time::Duration;

/// Duration with both fractional seconds and human-readable format
#[derive(Debug, Clone, Serialize)]
pub struct JsonDuration {
    pub seconds: f64,
    pub human: String,
}

impl JsonDuration {
    pub fn from_duration(d: Duration) -> Self {
        Self {
            seconds: d.as_secs_f64(),
            human: format_duration(d),
        }
    }
}

/// Top-level report
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub version: &'static str,
    pub config: Config,
    pub approximation: f64,
    pub reference: f64,
    pub absolute_error: f64,
    pub elapsed: JsonDuration,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<JsonWorkers>,
}

/// Aggregate worker view
#[derive(Debug, Clone, Serialize)]
pub struct JsonWorkers {
    pub successful: usize,
    pub failed: Vec<usize>,
    pub total_iterations: u64,
    pub imbalance: f64,
    pub per_worker: Vec<JsonWorker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonWorker {
    pub id: usize,
    pub start: u64,
    pub end: u64,
    pub iterations: u64,
    pub partial_sum: Option<f64>,
    pub elapsed: JsonDuration,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl JsonWorkers {
    fn from_stats(stats: &RunStats) -> Self {
        let per_worker = stats
            .reports()
            .iter()
            .map(|report| JsonWorker {
                id: report.worker_id,
                start: report.start,
                end: report.end,
                iterations: report.iterations,
                partial_sum: report.partial_sum,
                elapsed: JsonDuration::from_duration(report.elapsed),
                status: report.status.label(),
                reason: match &report.status {
                    WorkerStatus::Completed => None,
                    WorkerStatus::Failed { reason } => Some(reason.clone()),
                    WorkerStatus::Panicked { message } => Some(message.clone()),
                },
            })
            .collect();

        Self {
            successful: stats.successful(),
            failed: stats.failed_workers(),
            total_iterations: stats.total_iterations(),
            imbalance: stats.imbalance(),
            per_worker,
        }
    }
}

impl JsonReport {
    pub fn from_summary(summary: &RunSummary) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            config: summary.config.clone(),
            approximation: summary.approximation,
            reference: summary.reference,
            absolute_error: summary.absolute_error(),
            elapsed: JsonDuration::from_duration(summary.elapsed),
            workers: summary.stats.map(JsonWorkers::from_stats),
        }
    }
}

/// Serialize the summary as pretty-printed JSON
pub fn to_json(summary: &RunSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from_summary(summary))?)
}

/// Print the JSON report to stdout
pub fn print_json(summary: &RunSummary) -> Result<()> {
    println!("{}", to_json(summary)?);
    Ok(())
}
