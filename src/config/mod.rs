//! Configuration module
//!
//! Handles CLI argument parsing, input coercion and validation, and the
//! defaults shared by both execution modes.

pub mod cli;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Worker count used when none is given on the command line
pub const DEFAULT_WORKERS: usize = 4;

/// Number of subintervals used when none is given on the command line
pub const DEFAULT_INTERVALS: u64 = 2_000_000_000;

/// Largest accepted number of subintervals (`2^31 - 1`)
pub const MAX_INTERVALS: u64 = i32::MAX as u64;

/// Reference value the approximation is compared against
pub const REFERENCE_PI: f64 = 3.141592653589793238462643;

/// Complete run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Number of midpoint subintervals `n`
    pub intervals: u64,
    /// Number of worker threads `H` (already coerced to at least 1)
    pub workers: usize,
    #[serde(default)]
    pub mode: RunMode,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intervals: DEFAULT_INTERVALS,
            workers: DEFAULT_WORKERS,
            mode: RunMode::default(),
            output: OutputConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}

/// Execution mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Partitioned fork-join reduction over `workers` threads
    #[default]
    Parallel,
    /// Single-threaded midpoint rule on the calling thread
    Sequential,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunMode::Parallel => write!(f, "parallel"),
            RunMode::Sequential => write!(f, "sequential"),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Include the per-worker breakdown in text output
    #[serde(default)]
    pub per_worker: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Pin worker `k` to CPU `k mod cpus`
    #[serde(default)]
    pub pin_workers: bool,
    /// Stack size for worker threads (platform default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_stack_size: Option<usize>,
}
