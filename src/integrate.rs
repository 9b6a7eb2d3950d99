//! Sequential midpoint integration
//!
//! Single-threaded baseline: the same midpoint sum the workers compute, over
//! the whole domain on the calling thread.

use crate::worker::{Integrand, PiIntegrand};

/// Midpoint-rule approximation of the integral of `integrand` over `[0, 1]` with `n` subintervals
pub fn midpoint<I: Integrand + ?Sized>(n: u64, integrand: &I) -> f64 {
    let step = 1.0 / n as f64;
    let mut sum = 0.0;
    for i in 0..n {
        let x = step * (i as f64 + 0.5);
        sum += integrand.eval(x);
    }
    step * sum
}

/// Sequential approximation of pi
pub fn sequential_pi(n: u64) -> f64 {
    midpoint(n, &PiIntegrand)
}
