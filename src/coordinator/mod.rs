//! Coordinator module
//!
//! Orchestrates one fork-join computation: partitions the domain, launches a
//! worker per partition, joins them all, and folds their partial sums.
//!
//! # Failure policy
//!
//! - Pool bookkeeping that cannot be allocated aborts before any launch.
//! - A refused launch aborts too, but only after every worker that did start
//!   has been joined.
//! - A worker that cannot report a value, or whose join fails, is logged and
//!   left out of the sum. The result is then biased low by the missing
//!   ranges but the computation still completes.
//!
//! # Example
//!
//! ```
//! use pipulse::coordinator::{ComputationRequest, Coordinator};
//!
//! let request = ComputationRequest::new(1_000_000, 4)?;
//! let result = Coordinator::new().compute(&request)?;
//!
//! assert_eq!(result.workers, 4);
//! assert!((result.approximation - std::f64::consts::PI).abs() < 1e-6);
//! # Ok::<(), pipulse::Error>(())
//! ```

pub mod launcher;
pub mod mock;

use crate::config::validator::validate_intervals;
use crate::config::Config;
use crate::error::Error;
use crate::partition::{Partitions, WorkItem};
use crate::stats::{RunStats, WorkerReport};
use crate::worker::affinity;
use crate::worker::{Integrand, PiIntegrand, Worker};
use crate::Result;
use launcher::{Launcher, TaskHandle, ThreadLauncher};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Input to one computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputationRequest {
    intervals: u64,
    workers: i64,
}

impl ComputationRequest {
    /// Validate `intervals` and accept any `workers`
    ///
    /// `intervals` must lie in `1..=2^31-1`. A non-positive `workers` is not an
    /// error here; the coordinator clamps it to 1.
    pub fn new(intervals: i64, workers: i64) -> Result<Self> {
        Ok(Self {
            intervals: validate_intervals(intervals)?,
            workers,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let intervals = i64::try_from(config.intervals)
            .map_err(|_| Error::invalid_intervals(config.intervals))?;
        Self::new(intervals, i64::try_from(config.workers).unwrap_or(i64::MAX))
    }

    pub fn intervals(&self) -> u64 {
        self.intervals
    }

    pub fn workers(&self) -> i64 {
        self.workers
    }
}

/// Output of a finished computation
#[derive(Debug, Clone)]
pub struct ComputationResult {
    pub approximation: f64,
    pub intervals: u64,
    /// Effective worker count after clamping
    pub workers: usize,
    pub step: f64,
    pub stats: RunStats,
}

impl ComputationResult {
    /// True if some worker's range is missing from the approximation
    pub fn is_degraded(&self) -> bool {
        self.stats.successful() < self.workers
    }
}

/// Lifecycle of one computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputationState {
    Initial,
    Partitioned,
    Launching,
    AwaitingJoin,
    Aggregated,
    Aborted,
}

impl ComputationState {
    pub fn can_transition_to(self, next: ComputationState) -> bool {
        use ComputationState::*;
        matches!(
            (self, next),
            (Initial, Partitioned)
                | (Partitioned, Launching)
                | (Partitioned, Aborted)
                | (Launching, AwaitingJoin)
                | (Launching, Aborted)
                | (AwaitingJoin, Aggregated)
        )
    }
}

impl fmt::Display for ComputationState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ComputationState::Initial => "initial",
            ComputationState::Partitioned => "partitioned",
            ComputationState::Launching => "launching",
            ComputationState::AwaitingJoin => "awaiting-join",
            ComputationState::Aggregated => "aggregated",
            ComputationState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

fn advance(state: &mut ComputationState, next: ComputationState) {
    debug_assert!(
        state.can_transition_to(next),
        "invalid transition {} -> {}",
        state,
        next
    );
    trace!("computation {} -> {}", state, next);
    *state = next;
}

/// Clamp a requested worker count to at least one worker
pub fn effective_workers(requested: i64) -> usize {
    if requested <= 0 {
        warn!("invalid worker count ({}), using 1 worker", requested);
        1
    } else {
        usize::try_from(requested).unwrap_or(usize::MAX)
    }
}

/// Fork-join coordinator over a fixed pool of `h` workers
pub struct Coordinator<I = PiIntegrand, L = ThreadLauncher> {
    integrand: Arc<I>,
    launcher: L,
    pin_workers: bool,
}

impl Coordinator {
    /// Coordinator for `4 / (1 + x^2)` on plain OS threads
    pub fn new() -> Self {
        Self {
            integrand: Arc::new(PiIntegrand),
            launcher: ThreadLauncher::new(),
            pin_workers: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .with_launcher(ThreadLauncher::new().with_stack_size(config.runtime.worker_stack_size))
            .pin_workers(config.runtime.pin_workers)
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, L> Coordinator<I, L> {
    pub fn with_integrand<J>(self, integrand: J) -> Coordinator<J, L> {
        Coordinator {
            integrand: Arc::new(integrand),
            launcher: self.launcher,
            pin_workers: self.pin_workers,
        }
    }

    pub fn with_launcher<M>(self, launcher: M) -> Coordinator<I, M> {
        Coordinator {
            integrand: self.integrand,
            launcher,
            pin_workers: self.pin_workers,
        }
    }

    /// Pin worker `k` to CPU `k mod cpus`
    pub fn pin_workers(mut self, pin: bool) -> Self {
        self.pin_workers = pin;
        self
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}

impl<I, L> Coordinator<I, L>
where
    I: Integrand + 'static,
    L: Launcher,
{
    /// Run one computation to completion
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bookkeeping`] if the per-worker tracking structures
    /// cannot be allocated and [`Error::Launch`] if a worker cannot be
    /// started. Worker-local failures are not errors; see the module docs.
    pub fn compute(&self, request: &ComputationRequest) -> Result<ComputationResult> {
        let mut state = ComputationState::Initial;
        let intervals = request.intervals();
        let workers = effective_workers(request.workers());
        let step = 1.0 / intervals as f64;

        let partitions = Partitions::new(intervals, workers);
        advance(&mut state, ComputationState::Partitioned);

        let (mut items, mut handles, mut stats) = match allocate_bookkeeping(workers) {
            Ok(bookkeeping) => bookkeeping,
            Err(source) => {
                advance(&mut state, ComputationState::Aborted);
                return Err(Error::Bookkeeping { workers, source });
            }
        };
        items.extend(partitions);

        debug!(
            "computing with n = {}, H = {}, step = {:e}",
            intervals, workers, step
        );

        advance(&mut state, ComputationState::Launching);
        for item in &items {
            let mut worker = Worker::new(*item, Arc::clone(&self.integrand));
            if self.pin_workers {
                worker = worker.with_cpu(affinity::core_for_worker(item.worker_id));
            }

            match self.launcher.launch(item.worker_id, Box::new(move || worker.run())) {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    debug!(
                        "launch of worker {} failed, reclaiming {} launched workers",
                        item.worker_id,
                        handles.len()
                    );
                    reclaim(handles);
                    advance(&mut state, ComputationState::Aborted);
                    return Err(Error::Launch {
                        worker: item.worker_id,
                        workers,
                        source,
                    });
                }
            }
        }

        advance(&mut state, ComputationState::AwaitingJoin);
        let mut sum = 0.0;
        for (item, handle) in items.iter().zip(handles) {
            match handle.join() {
                Ok(partial) => {
                    debug_assert_eq!(partial.worker_id, item.worker_id);
                    match partial.outcome {
                        Ok(value) => {
                            sum += value;
                            stats.record(WorkerReport::completed(item, value, partial.elapsed));
                        }
                        Err(failure) => {
                            warn!(
                                "worker {} did not report a result ({}); range [{}, {}) excluded from the sum",
                                item.worker_id, failure, item.start, item.end
                            );
                            stats.record(WorkerReport::failed(item, failure.to_string(), partial.elapsed));
                        }
                    }
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(
                        "join of worker {} failed ({}); range [{}, {}) treated as absent",
                        item.worker_id, message, item.start, item.end
                    );
                    stats.record(WorkerReport::panicked(item, message));
                }
            }
        }
        advance(&mut state, ComputationState::Aggregated);

        Ok(ComputationResult {
            approximation: step * sum,
            intervals,
            workers,
            step,
            stats,
        })
    }
}

type Bookkeeping = (Vec<WorkItem>, Vec<TaskHandle>, RunStats);

fn allocate_bookkeeping(workers: usize) -> std::result::Result<Bookkeeping, std::collections::TryReserveError> {
    let mut items = Vec::new();
    items.try_reserve_exact(workers)?;
    let mut handles = Vec::new();
    handles.try_reserve_exact(workers)?;
    let stats = RunStats::try_with_capacity(workers)?;
    Ok((items, handles, stats))
}

/// Join already-launched workers, discarding whatever they produced
fn reclaim(handles: Vec<TaskHandle>) {
    for (worker_id, handle) in handles.into_iter().enumerate() {
        if let Err(payload) = handle.join() {
            warn!(
                "join of worker {} failed during abort ({})",
                worker_id,
                panic_message(payload.as_ref())
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
