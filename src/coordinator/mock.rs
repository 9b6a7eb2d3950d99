//! Mock launcher for testing
//!
//! Wraps [`ThreadLauncher`] and refuses to launch one chosen worker, the way
//! an exhausted runtime refuses to create another thread. It also counts
//! launched tasks that have run to completion, so tests can check that the
//! coordinator reclaims already-launched workers before aborting.
//!
//! # Example
//!
//! ```
//! use pipulse::coordinator::{ComputationRequest, Coordinator};
//! use pipulse::coordinator::mock::MockLauncher;
//!
//! let launcher = MockLauncher::failing_at(2);
//! let finished = launcher.finished_counter();
//! let coordinator = Coordinator::new().with_launcher(launcher);
//!
//! let request = ComputationRequest::new(1_000, 4).unwrap();
//! assert!(coordinator.compute(&request).is_err());
//! assert_eq!(finished.load(std::sync::atomic::Ordering::SeqCst), 2);
//! ```

use super::launcher::{Launcher, Task, TaskHandle, ThreadLauncher};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Launcher that fails for one worker id
#[derive(Debug, Clone, Default)]
pub struct MockLauncher {
    inner: ThreadLauncher,
    fail_at: Option<usize>,
    launched: Arc<AtomicUsize>,
    finished: Arc<AtomicUsize>,
}

impl MockLauncher {
    /// Launcher that behaves like [`ThreadLauncher`] but keeps counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Launcher that refuses to start worker `worker_id`
    pub fn failing_at(worker_id: usize) -> Self {
        Self {
            fail_at: Some(worker_id),
            ..Self::default()
        }
    }

    /// Number of tasks successfully started
    pub fn launched(&self) -> usize {
        self.launched.load(Ordering::SeqCst)
    }

    /// Shared counter of started tasks that have run to completion
    pub fn finished_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.finished)
    }
}

impl Launcher for MockLauncher {
    fn launch(&self, worker_id: usize, task: Task) -> io::Result<TaskHandle> {
        if self.fail_at == Some(worker_id) {
            return Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                format!("mock launcher refused worker {}", worker_id),
            ));
        }

        let finished = Arc::clone(&self.finished);
        let handle = self.inner.launch(
            worker_id,
            Box::new(move || {
                let result = task();
                finished.fetch_add(1, Ordering::SeqCst);
                result
            }),
        )?;
        self.launched.fetch_add(1, Ordering::SeqCst);
        Ok(handle)
    }
}
