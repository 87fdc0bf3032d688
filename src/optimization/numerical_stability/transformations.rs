//! Stable scalar maps between an unconstrained real line and a shifted
//! positive half-line.

/// Above this argument `softplus(x)` and `x` agree to machine precision.
pub const SOFTPLUS_LINEAR_CUTOFF: f64 = 20.0;

/// Numerically stable `softplus(x) = ln(1 + eᵡ)`.
///
/// Returns `x` once the exponential would dominate, and underflows to `0.0`
/// for very negative arguments instead of producing `NaN`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > SOFTPLUS_LINEAR_CUTOFF { x } else { x.exp().ln_1p() }
}

/// Inverse of [`safe_softplus`] for `x > 0`: `ln(eˣ − 1)`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > SOFTPLUS_LINEAR_CUTOFF { x } else { x.exp_m1().ln() }
}

/// Map an unconstrained `theta` onto `(lower, ∞)` as
/// `lower + scale·softplus(theta)`.
#[inline]
pub fn to_shifted_positive(theta: f64, lower: f64, scale: f64) -> f64 {
    lower + scale * safe_softplus(theta)
}

/// Inverse of [`to_shifted_positive`]; requires `x > lower` and `scale > 0`.
#[inline]
pub fn from_shifted_positive(x: f64, lower: f64, scale: f64) -> f64 {
    safe_softplus_inv((x - lower) / scale)
}
