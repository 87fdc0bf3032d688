use crate::optimization::{
    errors::{OptError, OptResult},
    scalar_optimizer::types::Grad,
};

pub fn verify_tolerance(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidTolerance { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Check the half-line `[lower, ∞)` and a starting point inside it.
pub fn verify_domain(lower: f64, start: f64) -> OptResult<()> {
    if !lower.is_finite() {
        return Err(OptError::InvalidLowerBound {
            value: lower,
            reason: "Lower bound must be finite.",
        });
    }
    if lower <= 0.0 {
        return Err(OptError::InvalidLowerBound {
            value: lower,
            reason: "Lower bound must be strictly positive.",
        });
    }
    if !start.is_finite() {
        return Err(OptError::InvalidStart { value: start, reason: "Start must be finite." });
    }
    if start <= lower {
        return Err(OptError::InvalidStart {
            value: start,
            reason: "Start must lie strictly above the lower bound.",
        });
    }
    Ok(())
}

pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

pub fn validate_estimate(estimate: Option<f64>) -> OptResult<f64> {
    match estimate {
        Some(value) if value.is_finite() => Ok(value),
        Some(value) => {
            Err(OptError::InvalidEstimate { value, reason: "Estimated minimizer must be finite." })
        }
        None => Err(OptError::MissingEstimate),
    }
}

pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Tolerance, iteration and domain checks used by option constructors
    //   and the public `minimize` entry point.
    // - Gradient and estimate validation applied to solver output.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Reject non-positive and non-finite tolerances and zero iterations.
    //
    // Given
    // -----
    // - tol ∈ {0, -1, NaN}, max_iter = 0.
    //
    // Expect
    // ------
    // - `InvalidTolerance` and `InvalidMaxIter` respectively.
    fn tolerance_and_iterations_are_checked() {
        // Act / Assert
        for tol in [0.0, -1.0, f64::NAN] {
            assert!(matches!(verify_tolerance(tol), Err(OptError::InvalidTolerance { .. })));
        }
        assert!(verify_tolerance(1e-6).is_ok());
        assert!(matches!(verify_max_iter(0), Err(OptError::InvalidMaxIter { .. })));
    }

    #[test]
    // Purpose
    // -------
    // The search domain needs a positive finite lower bound and a start
    // strictly above it.
    //
    // Given
    // -----
    // - Several invalid (lower, start) pairs and one valid pair.
    //
    // Expect
    // ------
    // - Matching error variants; the valid pair passes.
    fn domain_checks_cover_bound_and_start() {
        // Act / Assert
        assert!(matches!(verify_domain(0.0, 1.0), Err(OptError::InvalidLowerBound { .. })));
        assert!(matches!(
            verify_domain(f64::INFINITY, 1.0),
            Err(OptError::InvalidLowerBound { .. })
        ));
        assert!(matches!(verify_domain(1e-8, 1e-8), Err(OptError::InvalidStart { .. })));
        assert!(matches!(verify_domain(1e-8, f64::NAN), Err(OptError::InvalidStart { .. })));
        assert!(verify_domain(1e-8, 0.5).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Solver output is validated before it reaches callers.
    //
    // Given
    // -----
    // - A gradient with a NaN, a wrong-length gradient, and missing or
    //   infinite estimates.
    //
    // Expect
    // ------
    // - `InvalidGradient`, `GradientDimMismatch`, `MissingEstimate`,
    //   `InvalidEstimate`.
    fn solver_output_is_validated() {
        // Act / Assert
        assert!(matches!(
            validate_grad(&array![f64::NAN], 1),
            Err(OptError::InvalidGradient { index: 0, .. })
        ));
        assert!(matches!(
            validate_grad(&array![1.0, 2.0], 1),
            Err(OptError::GradientDimMismatch { expected: 1, found: 2 })
        ));
        assert_eq!(validate_estimate(None), Err(OptError::MissingEstimate));
        assert!(matches!(
            validate_estimate(Some(f64::INFINITY)),
            Err(OptError::InvalidEstimate { .. })
        ));
        assert_eq!(validate_estimate(Some(0.25)), Ok(0.25));
    }
}
