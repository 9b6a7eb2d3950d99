//! Statistics collection
//!
//! Per-worker reports and the run-level view built from them. The
//! coordinator records one [`WorkerReport`] per launched worker after the
//! join, in worker order, so the statistics never need synchronization.
//!
//! # Example
//!
//! ```
//! use pipulse::partition::partition;
//! use pipulse::stats::{RunStats, WorkerReport};
//! use std::time::Duration;
//!
//! let mut stats = RunStats::new();
//! for item in partition(100, 2) {
//!     stats.record(WorkerReport::completed(&item, 157.0, Duration::from_millis(10)));
//! }
//!
//! assert_eq!(stats.successful(), 2);
//! assert_eq!(stats.total_iterations(), 100);
//! assert!(stats.failed_workers().is_empty());
//! ```

use crate::partition::WorkItem;
use std::collections::TryReserveError;
use std::time::Duration;

/// How a worker ended
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerStatus {
    /// Reported a partial sum that went into the total
    Completed,
    /// Ran but could not report a usable value
    Failed { reason: String },
    /// Join reported an error; nothing is known about the worker's work
    Panicked { message: String },
}

impl WorkerStatus {
    pub fn label(&self) -> &'static str {
        match self {
            WorkerStatus::Completed => "ok",
            WorkerStatus::Failed { .. } => "failed",
            WorkerStatus::Panicked { .. } => "panicked",
        }
    }
}

/// Outcome of one worker as seen by the coordinator
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub start: u64,
    pub end: u64,
    /// Integrand evaluations performed
    pub iterations: u64,
    /// Unscaled partial sum, present only for completed workers
    pub partial_sum: Option<f64>,
    pub elapsed: Duration,
    pub status: WorkerStatus,
}

impl WorkerReport {
    pub fn completed(item: &WorkItem, partial_sum: f64, elapsed: Duration) -> Self {
        Self {
            worker_id: item.worker_id,
            start: item.start,
            end: item.end,
            iterations: item.len(),
            partial_sum: Some(partial_sum),
            elapsed,
            status: WorkerStatus::Completed,
        }
    }

    pub fn failed(item: &WorkItem, reason: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            worker_id: item.worker_id,
            start: item.start,
            end: item.end,
            iterations: item.len(),
            partial_sum: None,
            elapsed,
            status: WorkerStatus::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn panicked(item: &WorkItem, message: impl Into<String>) -> Self {
        Self {
            worker_id: item.worker_id,
            start: item.start,
            end: item.end,
            iterations: 0,
            partial_sum: None,
            elapsed: Duration::ZERO,
            status: WorkerStatus::Panicked {
                message: message.into(),
            },
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status == WorkerStatus::Completed
    }
}

/// Reports of every worker in one computation
#[derive(Debug, Clone, Default)]
pub struct RunStats {
    reports: Vec<WorkerReport>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for `workers` reports, failing instead of aborting when memory is short
    pub fn try_with_capacity(workers: usize) -> Result<Self, TryReserveError> {
        let mut reports = Vec::new();
        reports.try_reserve_exact(workers)?;
        Ok(Self { reports })
    }

    pub fn record(&mut self, report: WorkerReport) {
        self.reports.push(report);
    }

    pub fn reports(&self) -> &[WorkerReport] {
        &self.reports
    }

    pub fn workers(&self) -> usize {
        self.reports.len()
    }

    pub fn successful(&self) -> usize {
        self.reports.iter().filter(|r| r.is_ok()).count()
    }

    /// Ids of workers whose contribution is missing from the total
    pub fn failed_workers(&self) -> Vec<usize> {
        self.reports
            .iter()
            .filter(|r| !r.is_ok())
            .map(|r| r.worker_id)
            .collect()
    }

    pub fn total_iterations(&self) -> u64 {
        self.reports.iter().map(|r| r.iterations).sum()
    }

    pub fn slowest(&self) -> Option<&WorkerReport> {
        self.reports.iter().max_by_key(|r| r.elapsed)
    }

    pub fn mean_elapsed(&self) -> Duration {
        let timed: Vec<Duration> = self
            .reports
            .iter()
            .filter(|r| !matches!(r.status, WorkerStatus::Panicked { .. }))
            .map(|r| r.elapsed)
            .collect();
        if timed.is_empty() {
            return Duration::ZERO;
        }
        timed.iter().sum::<Duration>() / timed.len() as u32
    }

    /// Slowest worker time over mean worker time (1.0 means perfectly balanced)
    pub fn imbalance(&self) -> f64 {
        let mean = self.mean_elapsed().as_secs_f64();
        match self.slowest() {
            Some(slowest) if mean > 0.0 => slowest.elapsed.as_secs_f64() / mean,
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::partition;

    fn sample() -> RunStats {
        let items = partition(10, 3);
        let mut stats = RunStats::new();
        stats.record(WorkerReport::completed(&items[0], 1.5, Duration::from_millis(10)));
        stats.record(WorkerReport::failed(&items[1], "partial sum is not finite (NaN)", Duration::from_millis(30)));
        stats.record(WorkerReport::panicked(&items[2], "boom"));
        stats
    }

    #[test]
    fn test_counts() {
        let stats = sample();
        assert_eq!(stats.workers(), 3);
        assert_eq!(stats.successful(), 1);
        assert_eq!(stats.failed_workers(), vec![1, 2]);
    }

    #[test]
    fn test_iterations_exclude_panicked_workers() {
        // 4 + 3 evaluations ran; the panicked worker's 3 are unknown
        assert_eq!(sample().total_iterations(), 7);
    }

    #[test]
    fn test_slowest_and_imbalance() {
        let stats = sample();
        assert_eq!(stats.slowest().map(|r| r.worker_id), Some(1));
        assert_eq!(stats.mean_elapsed(), Duration::from_millis(20));
        assert!((stats.imbalance() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = RunStats::new();
        assert_eq!(stats.successful(), 0);
        assert!(stats.slowest().is_none());
        assert_eq!(stats.mean_elapsed(), Duration::ZERO);
        assert_eq!(stats.imbalance(), 1.0);
    }

    #[test]
    fn test_try_with_capacity() {
        assert!(RunStats::try_with_capacity(16).is_ok());
        assert!(RunStats::try_with_capacity(usize::MAX).is_err());
    }

    #[test]
    fn test_status_labels() {
        let stats = sample();
        let labels: Vec<_> = stats.reports().iter().map(|r| r.status.label()).collect();
        assert_eq!(labels, vec!["ok", "failed", "panicked"]);
    }
}
