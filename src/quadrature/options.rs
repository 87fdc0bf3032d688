//! Quadrature tolerances and subdivision budget.
use crate::quadrature::errors::{QuadError, QuadResult};

/// Default absolute error target.
pub const DEFAULT_ABS_TOL: f64 = 1e-10;

/// Default relative error target.
pub const DEFAULT_REL_TOL: f64 = 1e-9;

/// Default number of panel bisections allowed per integral.
pub const DEFAULT_MAX_SUBDIVISIONS: usize = 5000;

/// Accuracy targets for adaptive quadrature.
///
/// - `abs_tol`: absolute bound on the summed panel error estimates.
/// - `rel_tol`: relative bound, applied to `|estimate|`.
/// - `max_subdivisions`: number of bisections allowed before giving up.
///
/// Integration stops once the total error estimate is at most
/// `max(abs_tol, rel_tol · |estimate|)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadOptions {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub max_subdivisions: usize,
}

impl QuadOptions {
    /// Construct validated quadrature options.
    ///
    /// # Rules
    /// - Tolerances must be finite and non-negative, and not both zero.
    /// - `max_subdivisions` must be `> 0`.
    ///
    /// # Errors
    /// - [`QuadError::InvalidAbsTol`] / [`QuadError::InvalidRelTol`] for
    ///   negative or non-finite tolerances.
    /// - [`QuadError::NoTolerancesProvided`] if both tolerances are zero.
    /// - [`QuadError::InvalidMaxSubdivisions`] if the budget is zero.
    pub fn new(abs_tol: f64, rel_tol: f64, max_subdivisions: usize) -> QuadResult<Self> {
        if !abs_tol.is_finite() {
            return Err(QuadError::InvalidAbsTol { tol: abs_tol, reason: "Tolerance must be finite." });
        }
        if abs_tol < 0.0 {
            return Err(QuadError::InvalidAbsTol {
                tol: abs_tol,
                reason: "Tolerance must be non-negative.",
            });
        }
        if !rel_tol.is_finite() {
            return Err(QuadError::InvalidRelTol { tol: rel_tol, reason: "Tolerance must be finite." });
        }
        if rel_tol < 0.0 {
            return Err(QuadError::InvalidRelTol {
                tol: rel_tol,
                reason: "Tolerance must be non-negative.",
            });
        }
        if abs_tol == 0.0 && rel_tol == 0.0 {
            return Err(QuadError::NoTolerancesProvided);
        }
        if max_subdivisions == 0 {
            return Err(QuadError::InvalidMaxSubdivisions {
                max: max_subdivisions,
                reason: "Subdivision budget must be greater than zero.",
            });
        }
        Ok(Self { abs_tol, rel_tol, max_subdivisions })
    }

    /// Error target for a given running estimate.
    #[inline]
    pub fn target(&self, estimate: f64) -> f64 {
        self.abs_tol.max(self.rel_tol * estimate.abs())
    }
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            abs_tol: DEFAULT_ABS_TOL,
            rel_tol: DEFAULT_REL_TOL,
            max_subdivisions: DEFAULT_MAX_SUBDIVISIONS,
        }
    }
}
