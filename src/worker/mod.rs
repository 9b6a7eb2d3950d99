//! Worker task implementation
//!
//! A [`Worker`] owns exactly one [`WorkItem`] and turns it into a
//! [`PartialResult`]: the midpoint-rule sum of an [`Integrand`] over its
//! subrange. Accumulation is purely local, so workers never synchronize with
//! each other; the result is handed back by value through the thread join.
//!
//! # Example
//!
//! ```
//! use pipulse::partition::partition;
//! use pipulse::worker::{PiIntegrand, Worker};
//! use std::sync::Arc;
//!
//! let integrand = Arc::new(PiIntegrand);
//! let total: f64 = partition(1_000, 2)
//!     .into_iter()
//!     .map(|item| Worker::new(item, Arc::clone(&integrand)).run())
//!     .filter_map(|result| result.value())
//!     .sum();
//!
//! let pi = total / 1_000.0;
//! assert!((pi - std::f64::consts::PI).abs() < 1e-6);
//! ```

pub mod affinity;

use crate::partition::WorkItem;
use crate::util::time::Timestamp;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Function integrated over `[0, 1]`
pub trait Integrand: Send + Sync {
    fn eval(&self, x: f64) -> f64;
}

impl<F> Integrand for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// `f(x) = 4 / (1 + x^2)`, whose integral over `[0, 1]` is pi
#[derive(Debug, Clone, Copy, Default)]
pub struct PiIntegrand;

impl Integrand for PiIntegrand {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        4.0 / (1.0 + x * x)
    }
}

/// Reason a worker could not produce a usable partial sum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkerFailure {
    #[error("partial sum is not finite ({0})")]
    NonFinite(f64),
}

/// Outcome of one worker, moved to the coordinator at join time
#[derive(Debug, Clone)]
pub struct PartialResult {
    pub worker_id: usize,
    pub outcome: std::result::Result<f64, WorkerFailure>,
    pub elapsed: Duration,
}

impl PartialResult {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The partial sum, if the worker produced one
    #[inline]
    pub fn value(&self) -> Option<f64> {
        self.outcome.as_ref().ok().copied()
    }
}

/// Midpoint-rule sum of `integrand` over the item's subrange (not yet scaled by `step`)
pub fn partial_sum<I: Integrand + ?Sized>(item: &WorkItem, integrand: &I) -> f64 {
    let mut sum = 0.0;
    for i in item.range() {
        let x = item.step * (i as f64 + 0.5);
        sum += integrand.eval(x);
    }
    sum
}

/// Single worker bound to one work item
pub struct Worker<I> {
    item: WorkItem,
    integrand: Arc<I>,
    /// CPU to pin to before accumulating
    cpu: Option<usize>,
}

impl<I: Integrand> Worker<I> {
    pub fn new(item: WorkItem, integrand: Arc<I>) -> Self {
        Self {
            item,
            integrand,
            cpu: None,
        }
    }

    /// Pin the executing thread to `cpu` when the worker starts
    pub fn with_cpu(mut self, cpu: usize) -> Self {
        self.cpu = Some(cpu);
        self
    }

    pub fn id(&self) -> usize {
        self.item.worker_id
    }

    /// Accumulate the partial sum for this worker's range
    ///
    /// Never fails outright: a sum that cannot be used is reported as a
    /// failed outcome and left for the coordinator to exclude.
    pub fn run(self) -> PartialResult {
        let start = Timestamp::now();

        if let Some(cpu) = self.cpu {
            if let Err(e) = affinity::set_cpu_affinity(&[cpu]) {
                warn!("worker {}: could not pin to CPU {}: {:#}", self.id(), cpu, e);
            }
        }

        let sum = partial_sum(&self.item, self.integrand.as_ref());
        let outcome = if sum.is_finite() {
            Ok(sum)
        } else {
            Err(WorkerFailure::NonFinite(sum))
        };
        let elapsed = start.elapsed();

        debug!(
            "worker {} finished [{}, {}) in {:.6}s",
            self.item.worker_id,
            self.item.start,
            self.item.end,
            elapsed.as_secs_f64()
        );

        PartialResult {
            worker_id: self.item.worker_id,
            outcome,
            elapsed,
        }
    }
}
