//! pipulse - fork-join parallel integration
//!
//! Approximates pi as the integral of `4 / (1 + x^2)` over `[0, 1]` with the
//! midpoint rule, splitting the `n` subintervals across a fixed pool of `H`
//! worker threads and folding their partial sums.
//!
//! # Architecture
//!
//! - **Partitioning**: contiguous, near-equal ranges of `[0, n)`
//! - **Workers**: independent, lock-free local accumulation per range
//! - **Coordinator**: launch, join, fold; fatal vs. per-worker failure policy
//! - **Sequential baseline**: the same midpoint sum on one thread
//! - **Reporting**: text and JSON output, per-worker statistics

pub mod config;
pub mod coordinator;
pub mod error;
pub mod integrate;
pub mod output;
pub mod partition;
pub mod sequence;
pub mod stats;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use coordinator::{ComputationRequest, ComputationResult, Coordinator};
pub use error::Error;

/// Result type used throughout pipulse
pub type Result<T> = std::result::Result<T, Error>;
