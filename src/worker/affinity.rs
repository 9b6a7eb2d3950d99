//! CPU affinity binding
//!
//! Optional pinning of worker threads to CPU cores, which keeps each
//! worker's accumulator hot in one core's cache and stops the scheduler from
//! migrating workers mid-run.
//!
//! # Platform Support
//!
//! CPU affinity is supported on Linux via `sched_setaffinity`. Elsewhere
//! [`set_cpu_affinity`] returns an error, which workers log and ignore.
//!
//! # Example
//!
//! ```no_run
//! use pipulse::worker::affinity::{core_for_worker, set_cpu_affinity};
//!
//! set_cpu_affinity(&[core_for_worker(5)]).unwrap();
//! ```

use std::io;
use tracing::warn;

/// Set CPU affinity for the current thread
///
/// # Errors
///
/// Returns an error if the core list is empty, a core ID is too large for
/// `cpu_set_t`, or the syscall fails.
#[cfg(target_os = "linux")]
pub fn set_cpu_affinity(cores: &[usize]) -> io::Result<()> {
    use libc::{cpu_set_t, sched_setaffinity, CPU_SET, CPU_ZERO};
    use std::mem;

    if cores.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "CPU core list cannot be empty"));
    }

    unsafe {
        let mut cpu_set: cpu_set_t = mem::zeroed();
        CPU_ZERO(&mut cpu_set);

        for &core in cores {
            if core >= 1024 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("CPU core ID {} is too large (max 1023)", core),
                ));
            }
            CPU_SET(core, &mut cpu_set);
        }

        let result = sched_setaffinity(
            0, // 0 = current thread
            mem::size_of::<cpu_set_t>(),
            &cpu_set,
        );

        if result != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok(())
}

#[cfg(not(target_os = "linux"))]
pub fn set_cpu_affinity(_cores: &[usize]) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "CPU affinity is only supported on Linux",
    ))
}

/// Number of logical CPU cores available
pub fn num_cpus() -> usize {
    num_cpus::get()
}

/// Core that worker `worker_id` is pinned to (round-robin over all cores)
pub fn core_for_worker(worker_id: usize) -> usize {
    worker_id % num_cpus().max(1)
}

/// Warn when more workers than CPU cores are configured
///
/// Returns true if the worker count exceeds the CPU count.
pub fn warn_if_oversubscribed(workers: usize) -> bool {
    let cpu_count = num_cpus();
    if workers > cpu_count {
        warn!(
            "worker count ({}) exceeds CPU count ({}); workers will time-share cores",
            workers, cpu_count
        );
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_cpus() {
        assert!(num_cpus() >= 1);
    }

    #[test]
    fn test_core_for_worker_wraps() {
        let cpus = num_cpus();
        assert_eq!(core_for_worker(0), 0);
        assert_eq!(core_for_worker(cpus), 0);
        assert!(core_for_worker(cpus + 1) < cpus);
    }

    #[test]
    fn test_warn_if_oversubscribed() {
        let cpus = num_cpus();
        assert!(!warn_if_oversubscribed(1));
        assert!(!warn_if_oversubscribed(cpus));
        assert!(warn_if_oversubscribed(cpus + 1));
    }

    #[test]
    fn test_set_cpu_affinity_empty() {
        assert!(set_cpu_affinity(&[]).is_err());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_set_cpu_affinity_invalid_core() {
        let err = set_cpu_affinity(&[4096]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
