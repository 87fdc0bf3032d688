//! density::cross_validation — unbiased (least-squares) cross-validation.
//!
//! Purpose
//! -------
//! Score a bandwidth by
//!
//! ```text
//! UCV(h) = ∫ f̂(x; h)² dx − (2/n)·Σᵢ f̂₋ᵢ(xᵢ; h)
//! f̂₋ᵢ(xᵢ; h) = (1/(n−1))·Σ_{j≠i} φ(xᵢ; xⱼ, h)
//! ```
//!
//! and expose the score to the scalar optimizer.
//!
//! Key behaviors
//! -------------
//! - The first term integrates the full-sample density; only the second
//!   term leaves observations out.
//! - The leave-one-out term is two nested index loops with `j ≠ i`; there
//!   are exactly `n` held-out points and no partition objects.
//! - With the `parallel` feature the per-`i` terms are computed with rayon,
//!   collected in index order, and summed sequentially, so the score does
//!   not depend on scheduling.
//! - [`UcvObjective`] keeps the first [`KdeError`] raised during a search so
//!   callers can report it instead of the optimizer's generic wrapper.
//!
//! Invariants & assumptions
//! ------------------------
//! - O(n²) kernel evaluations per score plus one squared-density integral.
//! - The criterion need not be convex; local minima are accepted.
use std::cell::RefCell;

use crate::{
    density::{
        errors::{KdeError, KdeResult},
        estimator::DensityEstimator,
        kernel::gaussian_kernel,
        validation::{validate_bandwidth, validate_sample},
    },
    optimization::{
        errors::{OptError, OptResult},
        scalar_optimizer::ScalarObjective,
    },
};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// `UCV(h)` for the estimator's sample.
///
/// Errors
/// ------
/// - `KdeError::InvalidBandwidth` for invalid `h`.
/// - `KdeError::Integration` when the squared-density integral fails.
pub fn ucv_score(estimator: &DensityEstimator, h: f64) -> KdeResult<f64> {
    validate_bandwidth(h)?;
    let squared = estimator.squared_integral(h)?;
    Ok(squared - 2.0 * loo_mean(estimator.sample(), h))
}

/// Mean over `i` of the leave-one-out density at `xᵢ`.
pub fn leave_one_out_mean(sample: &[f64], h: f64) -> KdeResult<f64> {
    validate_sample(sample)?;
    validate_bandwidth(h)?;
    Ok(loo_mean(sample, h))
}

fn loo_mean(sample: &[f64], h: f64) -> f64 {
    let n = sample.len();
    let held_out = |i: usize| -> f64 {
        let xi = sample[i];
        let mut acc = 0.0;
        for (j, &xj) in sample.iter().enumerate() {
            if j != i {
                acc += gaussian_kernel(xi, xj, h);
            }
        }
        acc / (n - 1) as f64
    };

    #[cfg(feature = "parallel")]
    let terms: Vec<f64> = (0..n).into_par_iter().map(held_out).collect();
    #[cfg(not(feature = "parallel"))]
    let terms: Vec<f64> = (0..n).map(held_out).collect();

    terms.iter().sum::<f64>() / n as f64
}

/// UCV as a [`ScalarObjective`] over the bandwidth.
#[derive(Debug)]
pub struct UcvObjective<'a> {
    estimator: &'a DensityEstimator,
    failure: RefCell<Option<KdeError>>,
}

impl<'a> UcvObjective<'a> {
    pub fn new(estimator: &'a DensityEstimator) -> Self {
        Self { estimator, failure: RefCell::new(None) }
    }

    /// First error raised by a UCV evaluation, if any; clears it.
    pub fn take_failure(&self) -> Option<KdeError> {
        self.failure.take()
    }
}

impl ScalarObjective for UcvObjective<'_> {
    fn value(&self, h: f64) -> OptResult<f64> {
        match ucv_score(self.estimator, h) {
            Ok(score) => {
                log::trace!("ucv(h = {h:.6e}) = {score:.10e}");
                Ok(score)
            }
            Err(err) => {
                let text = err.to_string();
                self.failure.borrow_mut().get_or_insert(err);
                Err(OptError::ObjectiveFailed { at: h, text })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        density::{
            errors::ErrorKind,
            options::{EstimatorOptions, IntegralMethod},
        },
        quadrature::options::QuadOptions,
    };
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The leave-one-out mean against a hand-expanded two-point case.
    // - UCV agreement between quadrature and closed-form integrals.
    // - Capture of estimator errors by `UcvObjective`.
    // - Fixed reduction order under the `parallel` feature.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // With two observations each held-out density is a single kernel.
    //
    // Given
    // -----
    // - Sample {0, 1}, h = 0.5.
    //
    // Expect
    // ------
    // - Mean equals φ(1; 0, 0.5).
    fn leave_one_out_mean_two_points() {
        // Act
        let mean = leave_one_out_mean(&[0.0, 1.0], 0.5).unwrap();

        // Assert
        assert_relative_eq!(mean, gaussian_kernel(1.0, 0.0, 0.5), max_relative = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Duplicated observations contribute to each other's held-out density.
    //
    // Given
    // -----
    // - Sample {2, 2, 2}, h = 1.
    //
    // Expect
    // ------
    // - Every held-out density is φ(0; 0, 1), so the mean is the kernel peak.
    fn leave_one_out_mean_with_duplicates() {
        // Act
        let mean = leave_one_out_mean(&[2.0, 2.0, 2.0], 1.0).unwrap();

        // Assert
        assert_relative_eq!(mean, gaussian_kernel(0.0, 0.0, 1.0), max_relative = 1e-15);
    }

    #[test]
    #[cfg(feature = "parallel")]
    // Purpose
    // -------
    // The rayon path reduces in index order, so it reproduces the sequential
    // sum bit for bit.
    //
    // Given
    // -----
    // - 60 irregularly spaced points, h = 0.35.
    //
    // Expect
    // ------
    // - `leave_one_out_mean` equals an index-order sequential sum exactly,
    //   on repeated calls.
    fn parallel_leave_one_out_matches_sequential_sum() {
        // Arrange
        let sample: Vec<f64> =
            (0..60).map(|i| f64::from(i) * 0.17 + (f64::from(i) * 2.3).sin() * 0.9).collect();
        let h = 0.35;
        let n = sample.len();
        let mut sequential = 0.0;
        for i in 0..n {
            let mut acc = 0.0;
            for j in 0..n {
                if j != i {
                    acc += gaussian_kernel(sample[i], sample[j], h);
                }
            }
            sequential += acc / (n - 1) as f64;
        }
        let sequential = sequential / n as f64;

        for _ in 0..5 {
            // Act
            let parallel = leave_one_out_mean(&sample, h).unwrap();

            // Assert
            assert_eq!(parallel.to_bits(), sequential.to_bits());
        }
    }

    #[test]
    // Purpose
    // -------
    // The score is identical in structure across integral strategies.
    //
    // Given
    // -----
    // - Sample {1, 2, 2.5, 3, 8}, h ∈ {0.2, 0.7, 3}.
    //
    // Expect
    // ------
    // - Quadrature and closed-form UCV agree to 1e-8 absolute.
    fn ucv_agrees_across_strategies() {
        // Arrange
        let sample = [1.0, 2.0, 2.5, 3.0, 8.0];
        let quad = DensityEstimator::new(&sample).unwrap();
        let exact = DensityEstimator::with_options(&sample, EstimatorOptions::closed_form()).unwrap();

        for &h in &[0.2, 0.7, 3.0] {
            // Act
            let a = ucv_score(&quad, h).unwrap();
            let b = ucv_score(&exact, h).unwrap();

            // Assert
            assert!((a - b).abs() < 1e-8, "h = {h}: quadrature {a}, closed form {b}");
        }
    }

    #[test]
    // Purpose
    // -------
    // A failing evaluation is kept by the objective and reported to the
    // optimizer as `ObjectiveFailed`.
    //
    // Given
    // -----
    // - An estimator whose quadrature budget cannot meet its tolerance.
    //
    // Expect
    // ------
    // - `value` returns `ObjectiveFailed`; `take_failure` yields an
    //   integration error once, then `None`.
    fn objective_captures_estimator_error() {
        // Arrange
        let quad = QuadOptions::new(1e-300, 0.0, 1).unwrap();
        let opts = EstimatorOptions::new(IntegralMethod::Quadrature, quad);
        let kde = DensityEstimator::with_options(&[0.0, 1.0, 3.0], opts).unwrap();
        let objective = UcvObjective::new(&kde);

        // Act
        let err = objective.value(0.5).unwrap_err();
        let captured = objective.take_failure();

        // Assert
        assert!(matches!(err, OptError::ObjectiveFailed { .. }));
        assert_eq!(captured.map(|e| e.kind()), Some(ErrorKind::Integration));
        assert!(objective.take_failure().is_none());
    }
}
