//! Single-worker sequence generation
//!
//! Builds the Fibonacci sequence on one dedicated worker thread. The worker
//! owns the buffer while it fills it and hands it back through the join, so
//! the caller never observes a partially written sequence.
//!
//! Convention: `F(0) = 0`, `F(1) = 1`, `F(i) = F(i - 1) + F(i - 2)`.
//!
//! # Example
//!
//! ```
//! use pipulse::sequence::fibonacci;
//!
//! assert_eq!(fibonacci(7)?, vec![0, 1, 1, 2, 3, 5, 8]);
//! # Ok::<(), pipulse::Error>(())
//! ```

use crate::error::Error;
use crate::Result;
use std::thread;
use tracing::debug;

/// Longest sequence whose terms all fit in `u64` (`F(93)` is the last one)
pub const MAX_FIBONACCI_TERMS: usize = 94;

/// First `count` Fibonacci numbers, computed on a worker thread
///
/// # Errors
///
/// Fails if `count` exceeds [`MAX_FIBONACCI_TERMS`], if the worker thread
/// cannot be spawned, or if it panics.
pub fn fibonacci(count: usize) -> Result<Vec<u64>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if count > MAX_FIBONACCI_TERMS {
        return Err(Error::SequenceTooLong {
            requested: count,
            max: MAX_FIBONACCI_TERMS,
        });
    }

    let handle = thread::Builder::new()
        .name("fibonacci-worker".to_string())
        .spawn(move || fill_fibonacci(count))
        .map_err(|e| Error::SequenceWorker {
            message: "could not spawn worker thread".to_string(),
            source: Some(e),
        })?;

    let terms = handle.join().map_err(|_| Error::SequenceWorker {
        message: "worker thread panicked".to_string(),
        source: None,
    })?;

    debug!("generated {} Fibonacci terms", terms.len());
    Ok(terms)
}

fn fill_fibonacci(count: usize) -> Vec<u64> {
    let mut terms = Vec::with_capacity(count);
    for i in 0..count {
        let next = match i {
            0 => 0,
            1 => 1,
            _ => terms[i - 1] + terms[i - 2],
        };
        terms.push(next);
    }
    terms
}
