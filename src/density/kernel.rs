//! Gaussian smoothing kernel and its distribution function.
//!
//! Both functions take the kernel centre `mu` and the bandwidth `h` as the
//! standard deviation. Callers guarantee `h > 0`; public estimator entry
//! points validate it.
//!
//! Conventions:
//! - Large standardized distances underflow to `0.0` (density) or saturate
//!   at `0.0`/`1.0` (distribution function); `x = ±∞` is allowed and never
//!   yields `NaN`.
use statrs::{consts::SQRT_2PI, function::erf::erfc};
use std::f64::consts::SQRT_2;

/// Gaussian density with mean `mu` and standard deviation `h`, at `x`.
///
/// `φ(x; mu, h) = exp(-½·((x − mu)/h)²) / (h·√(2π))`
#[inline]
pub fn gaussian_kernel(x: f64, mu: f64, h: f64) -> f64 {
    let z = (x - mu) / h;
    (-0.5 * z * z).exp() / (h * SQRT_2PI)
}

/// Gaussian distribution function with mean `mu` and standard deviation
/// `h`, at `x`.
///
/// Computed as `½·erfc(−(x − mu)/(h·√2))`, which keeps full relative
/// precision in the lower tail.
#[inline]
pub fn gaussian_kernel_cdf(x: f64, mu: f64, h: f64) -> f64 {
    if x == f64::INFINITY {
        return 1.0;
    }
    if x == f64::NEG_INFINITY {
        return 0.0;
    }
    0.5 * erfc(-(x - mu) / (h * SQRT_2))
}
