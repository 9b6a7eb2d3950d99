//! Error types
//!
//! Fatal conditions surface as [`Error`]. Worker-local problems are
//! [`crate::worker::WorkerFailure`] values carried inside a partial result and
//! never abort a computation on their own.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// `n` outside `1..=i32::MAX`
    #[error("the number of subintervals must be between 1 and {max}, got {value}")]
    InvalidIntervals { value: String, max: u64 },

    /// Pool bookkeeping (work items, task handles) could not be allocated
    #[error("failed to allocate bookkeeping for {workers} workers")]
    Bookkeeping {
        workers: usize,
        #[source]
        source: TryReserveError,
    },

    /// The launcher refused to start a worker; earlier workers were joined
    #[error("failed to launch worker {worker} of {workers}")]
    Launch {
        worker: usize,
        workers: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report")]
    Serialization(#[from] serde_json::Error),

    #[error("sequence length {requested} exceeds the maximum of {max} terms representable in u64")]
    SequenceTooLong { requested: usize, max: usize },

    #[error("sequence worker failed: {message}")]
    SequenceWorker {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl Error {
    pub fn invalid_intervals(value: impl ToString) -> Self {
        Self::InvalidIntervals {
            value: value.to_string(),
            max: crate::config::MAX_INTERVALS,
        }
    }

    /// Whether the error stems from user input rather than the runtime
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidIntervals { .. } | Self::SequenceTooLong { .. })
    }
}
