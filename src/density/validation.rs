//! density::validation — input guards shared by the estimator entry points.
//!
//! Purpose
//! -------
//! Reject invalid samples, bandwidths and evaluation points before any
//! O(n) or O(n²) work starts, reporting the offending value.
//!
//! Invariants & assumptions
//! ------------------------
//! - A sample needs at least 2 observations, all finite.
//! - A bandwidth must be finite and strictly positive.
//! - Evaluation points may be ±∞ (the density is 0 there) but not NaN.
use crate::density::errors::{KdeError, KdeResult};

/// Minimum number of observations accepted by the estimator.
pub const MIN_SAMPLE_LEN: usize = 2;

/// Validate a sample of observations.
///
/// Errors
/// ------
/// - `KdeError::InsufficientData` when `sample.len() < 2`.
/// - `KdeError::NonFiniteSample` for the first NaN or ±∞ value.
pub fn validate_sample(sample: &[f64]) -> KdeResult<()> {
    if sample.len() < MIN_SAMPLE_LEN {
        return Err(KdeError::InsufficientData { len: sample.len() });
    }
    if let Some((index, &value)) = sample.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(KdeError::NonFiniteSample { index, value });
    }
    Ok(())
}

pub fn validate_bandwidth(h: f64) -> KdeResult<()> {
    if !h.is_finite() || h <= 0.0 {
        return Err(KdeError::InvalidBandwidth { value: h });
    }
    Ok(())
}

pub fn validate_point(x: f64) -> KdeResult<()> {
    if x.is_nan() {
        return Err(KdeError::InvalidEvaluationPoint { value: x });
    }
    Ok(())
}

pub fn validate_lower_bound(lower: f64) -> KdeResult<()> {
    if !lower.is_finite() {
        return Err(KdeError::InvalidLowerBound {
            value: lower,
            reason: "Lower bound must be finite.",
        });
    }
    if lower <= 0.0 {
        return Err(KdeError::InvalidLowerBound {
            value: lower,
            reason: "Lower bound must be strictly positive.",
        });
    }
    Ok(())
}
