//! Launching units of execution
//!
//! The coordinator never calls `std::thread` directly; it goes through a
//! [`Launcher`]. [`ThreadLauncher`] spawns one named OS thread per worker.
//! Tests swap in [`super::mock::MockLauncher`] to make a chosen launch fail.

use crate::worker::PartialResult;
use std::io;
use std::thread::{self, JoinHandle};

/// Work handed to a launcher: runs one worker to completion
pub type Task = Box<dyn FnOnce() -> PartialResult + Send + 'static>;

/// Handle the coordinator joins to receive a worker's result
pub type TaskHandle = JoinHandle<PartialResult>;

/// Creates one unit of execution per worker
pub trait Launcher: Send + Sync {
    /// Start `task` for `worker_id`
    ///
    /// An error means the unit was never started and `task` was dropped
    /// without running.
    fn launch(&self, worker_id: usize, task: Task) -> io::Result<TaskHandle>;
}

/// Spawns a dedicated OS thread per worker
#[derive(Debug, Clone, Default)]
pub struct ThreadLauncher {
    stack_size: Option<usize>,
}

impl ThreadLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack_size(mut self, bytes: Option<usize>) -> Self {
        self.stack_size = bytes;
        self
    }
}

impl Launcher for ThreadLauncher {
    fn launch(&self, worker_id: usize, task: Task) -> io::Result<TaskHandle> {
        let mut builder = thread::Builder::new().name(format!("pi-worker-{}", worker_id));
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }
        builder.spawn(task)
    }
}
