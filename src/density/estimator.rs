//! density::estimator — Gaussian kernel density estimator over a fixed
//! sample.
//!
//! Purpose
//! -------
//! Own a validated sample and evaluate, for any bandwidth `h > 0`, the
//! kernel density estimate
//! `f̂(x; h) = (1/n)·Σᵢ φ(x; xᵢ, h)`, its distribution function, and the
//! integrals the cross-validation criterion needs. Bandwidth selection is
//! reached through [`DensityEstimator::select_bandwidth`].
//!
//! Key behaviors
//! -------------
//! - `pdf` is an O(n) sum of Gaussian kernels; it is non-negative and
//!   integrates to one.
//! - `cdf`, `total_mass` and `squared_integral` use the configured
//!   [`IntegralMethod`]. Under quadrature the integrator is given break
//!   points `xᵢ + m·2h`, `m = −4..=4`, for every observation, and the
//!   infinite tails are mapped with scale `h`, so narrow kernels are never
//!   stepped over.
//! - Bandwidths quadrature cannot resolve are integrated with the
//!   closed-form identities instead: `h` below
//!   [`MIN_RESOLVED_ULPS`] ulps of the largest `|xᵢ|`, where kernel panels
//!   collapse onto single floats, or below [`MIN_QUADRATURE_BANDWIDTH`],
//!   where `f̂²` overflows.
//! - `cdf` results are clamped to `[0, 1]`.
//! - `cdf_grid` integrates between consecutive sorted points and
//!   accumulates, so grid output is monotone by construction. Separate
//!   pointwise `cdf` calls are monotone up to the quadrature tolerance;
//!   under `ClosedForm` they are monotone up to rounding.
//!
//! Invariants & assumptions
//! ------------------------
//! - The sample has at least two observations, all finite, and never
//!   changes after construction.
//! - The bandwidth is an argument to every evaluation and is never stored.
//! - The estimator is immutable, hence `Send + Sync`.
//!
//! Downstream usage
//! ----------------
//! - Plotting collaborators call `pdf_grid` / `cdf_grid` with a fitted
//!   bandwidth from `find_bandwidth`.
//!
//! Testing notes
//! -------------
//! - Unit tests check reference values, normalization, monotonicity and
//!   agreement between the two integral strategies. Integration tests in
//!   `tests/` cover the end-to-end pipeline.
use crate::{
    density::{
        bandwidth::{self, BandwidthOptions, BandwidthOutcome},
        cross_validation::ucv_score,
        errors::{KdeError, KdeResult},
        kernel::{gaussian_kernel, gaussian_kernel_cdf},
        options::{EstimatorOptions, IntegralMethod},
        validation::{validate_bandwidth, validate_point, validate_sample},
    },
    quadrature::integrator::Integrator,
};
use ndarray::Array1;
use std::f64::consts::SQRT_2;

/// Half-width, in bandwidths, of the break point window around each
/// observation.
pub const BREAKPOINT_REACH: f64 = 8.0;

/// Break point spacing, in bandwidths.
pub const BREAKPOINT_SPACING: f64 = 2.0;

/// Smallest bandwidth, in ulps of the largest `|xᵢ|`, integrated by
/// quadrature.
pub const MIN_RESOLVED_ULPS: f64 = 1e4;

/// Smallest bandwidth integrated by quadrature; `f̂² ≤ 1/(2π·h²)` stays
/// finite above it.
pub const MIN_QUADRATURE_BANDWIDTH: f64 = 1e-150;

#[derive(Debug, Clone, PartialEq)]
pub struct DensityEstimator {
    sample: Vec<f64>,
    magnitude: f64,
    opts: EstimatorOptions,
}

impl DensityEstimator {
    /// Build an estimator with default options.
    ///
    /// Errors
    /// ------
    /// - `KdeError::InsufficientData` for fewer than two observations.
    /// - `KdeError::NonFiniteSample` for any NaN or ±∞ observation.
    pub fn new(sample: &[f64]) -> KdeResult<Self> {
        Self::with_options(sample, EstimatorOptions::default())
    }

    pub fn with_options(sample: &[f64], opts: EstimatorOptions) -> KdeResult<Self> {
        validate_sample(sample)?;
        let magnitude = sample.iter().fold(0.0_f64, |m, &x| m.max(x.abs()));
        Ok(Self { sample: sample.to_vec(), magnitude, opts })
    }

    pub fn sample(&self) -> &[f64] {
        &self.sample
    }

    pub fn n_obs(&self) -> usize {
        self.sample.len()
    }

    pub fn options(&self) -> &EstimatorOptions {
        &self.opts
    }

    /// Density estimate at `x` for bandwidth `h`.
    ///
    /// Errors
    /// ------
    /// - `KdeError::InvalidBandwidth` unless `h` is finite and `> 0`.
    /// - `KdeError::InvalidEvaluationPoint` if `x` is NaN. `x = ±∞` gives 0.
    pub fn pdf(&self, x: f64, h: f64) -> KdeResult<f64> {
        validate_bandwidth(h)?;
        validate_point(x)?;
        Ok(self.density(x, h))
    }

    /// Distribution function `∫_{−∞}^{x} f̂(t; h) dt`, clamped to `[0, 1]`.
    ///
    /// Each call integrates independently, so under quadrature two calls
    /// with `x₁ < x₂` may differ from monotone by up to the integration
    /// tolerance. Use [`cdf_grid`](Self::cdf_grid) when exact monotonicity
    /// across points matters.
    ///
    /// Errors
    /// ------
    /// - Input errors as for [`pdf`](Self::pdf).
    /// - `KdeError::Integration` when quadrature does not converge.
    pub fn cdf(&self, x: f64, h: f64) -> KdeResult<f64> {
        validate_bandwidth(h)?;
        validate_point(x)?;
        let value = match self.integral_method(h) {
            IntegralMethod::ClosedForm => self.kernel_cdf_mean(x, h),
            IntegralMethod::Quadrature => self.integrate_density(f64::NEG_INFINITY, x, h)?,
        };
        Ok(value.clamp(0.0, 1.0))
    }

    /// Evaluate [`pdf`](Self::pdf) on every point of `xs`.
    pub fn pdf_grid(&self, xs: &[f64], h: f64) -> KdeResult<Array1<f64>> {
        validate_bandwidth(h)?;
        let values = xs
            .iter()
            .map(|&x| {
                validate_point(x)?;
                Ok(self.density(x, h))
            })
            .collect::<KdeResult<Vec<f64>>>()?;
        Ok(Array1::from_vec(values))
    }

    /// Evaluate [`cdf`](Self::cdf) on every point of `xs`, in input order.
    ///
    /// Under quadrature the points are visited in sorted order and each
    /// value adds the integral from the previous point, so the output is
    /// non-decreasing in `x`.
    pub fn cdf_grid(&self, xs: &[f64], h: f64) -> KdeResult<Array1<f64>> {
        validate_bandwidth(h)?;
        for &x in xs {
            validate_point(x)?;
        }
        let mut out = Array1::zeros(xs.len());
        match self.integral_method(h) {
            IntegralMethod::ClosedForm => {
                for (slot, &x) in out.iter_mut().zip(xs) {
                    *slot = self.kernel_cdf_mean(x, h).clamp(0.0, 1.0);
                }
            }
            IntegralMethod::Quadrature => {
                let mut order: Vec<usize> = (0..xs.len()).collect();
                order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));
                let mut running = 0.0;
                let mut prev = f64::NEG_INFINITY;
                for idx in order {
                    let x = xs[idx];
                    if x > prev {
                        running += self.integrate_density(prev, x, h)?;
                        prev = x;
                    }
                    out[idx] = running.clamp(0.0, 1.0);
                }
            }
        }
        Ok(out)
    }

    /// `∫ f̂(x; h) dx` over ℝ; equals one up to integration error.
    pub fn total_mass(&self, h: f64) -> KdeResult<f64> {
        validate_bandwidth(h)?;
        match self.integral_method(h) {
            IntegralMethod::ClosedForm => Ok(self.kernel_cdf_mean(f64::INFINITY, h)),
            IntegralMethod::Quadrature => {
                self.integrate_density(f64::NEG_INFINITY, f64::INFINITY, h)
            }
        }
    }

    /// `∫ f̂(x; h)² dx` over ℝ, the first term of the UCV criterion.
    pub fn squared_integral(&self, h: f64) -> KdeResult<f64> {
        validate_bandwidth(h)?;
        match self.integral_method(h) {
            IntegralMethod::ClosedForm => Ok(self.squared_integral_exact(h)),
            IntegralMethod::Quadrature => {
                let integrator = self.integrator(h)?;
                let out = integrator.integrate(
                    |x| {
                        let d = self.density(x, h);
                        d * d
                    },
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                )?;
                log::trace!(
                    "squared integral h = {h:.6e}: {:.10e} (err {:.2e}, {} panels)",
                    out.value,
                    out.abs_error,
                    out.panels
                );
                Ok(out.value)
            }
        }
    }

    /// Unbiased cross-validation score at `h`.
    pub fn ucv(&self, h: f64) -> KdeResult<f64> {
        ucv_score(self, h)
    }

    /// Silverman-style starting bandwidth for this sample.
    pub fn rule_of_thumb_bandwidth(&self) -> f64 {
        bandwidth::silverman(&self.sample)
    }

    /// Bandwidth minimizing the UCV criterion.
    ///
    /// Errors
    /// ------
    /// - `KdeError::InvalidLowerBound` or an optimizer configuration error
    ///   (kind `InvalidInput`) for invalid options.
    /// - `KdeError::Integration` when a UCV evaluation fails to integrate.
    /// - `KdeError::Optimization` when the search does not converge and
    ///   `best_effort` is off.
    pub fn find_bandwidth(&self, opts: &BandwidthOptions) -> KdeResult<f64> {
        self.select_bandwidth(opts).map(|outcome| outcome.bandwidth)
    }

    /// Like [`find_bandwidth`](Self::find_bandwidth) but returning the full
    /// search outcome.
    pub fn select_bandwidth(&self, opts: &BandwidthOptions) -> KdeResult<BandwidthOutcome> {
        bandwidth::select(self, opts)
    }

    // ---- Helper Methods ----

    /// Strategy used at `h`: the configured one, unless quadrature cannot
    /// resolve `h`.
    fn integral_method(&self, h: f64) -> IntegralMethod {
        let resolution = MIN_RESOLVED_ULPS * f64::EPSILON * self.magnitude;
        let threshold = MIN_QUADRATURE_BANDWIDTH.max(resolution);
        match self.opts.integral {
            IntegralMethod::Quadrature if h < threshold => {
                log::debug!(
                    "h = {h:.3e} below quadrature resolution {threshold:.3e}, using closed form"
                );
                IntegralMethod::ClosedForm
            }
            method => method,
        }
    }

    #[inline]
    pub(crate) fn density(&self, x: f64, h: f64) -> f64 {
        let sum: f64 = self.sample.iter().map(|&xi| gaussian_kernel(x, xi, h)).sum();
        sum / self.sample.len() as f64
    }

    fn kernel_cdf_mean(&self, x: f64, h: f64) -> f64 {
        let sum: f64 = self.sample.iter().map(|&xi| gaussian_kernel_cdf(x, xi, h)).sum();
        sum / self.sample.len() as f64
    }

    fn squared_integral_exact(&self, h: f64) -> f64 {
        let n = self.sample.len() as f64;
        let h2 = SQRT_2 * h;
        let mut acc = 0.0;
        for &xi in &self.sample {
            for &xj in &self.sample {
                acc += gaussian_kernel(xi, xj, h2);
            }
        }
        acc / (n * n)
    }

    fn integrate_density(&self, lower: f64, upper: f64, h: f64) -> KdeResult<f64> {
        if upper == f64::NEG_INFINITY {
            return Ok(0.0);
        }
        let out = self.integrator(h)?.integrate(|x| self.density(x, h), lower, upper)?;
        Ok(out.value)
    }

    fn integrator(&self, h: f64) -> KdeResult<Integrator> {
        Integrator::new(self.opts.quad)
            .with_breakpoints(self.breakpoints(h))
            .with_tail_scale(h)
            .map_err(KdeError::from)
    }

    /// Points `xᵢ + m·2h` for `|m·2h| ≤ 8h`, sorted and deduplicated.
    fn breakpoints(&self, h: f64) -> Vec<f64> {
        let spacing = BREAKPOINT_SPACING * h;
        let steps = (BREAKPOINT_REACH / BREAKPOINT_SPACING) as i32;
        let mut points = Vec::with_capacity(self.sample.len() * (2 * steps as usize + 1));
        for &xi in &self.sample {
            points.extend((-steps..=steps).map(|m| xi + f64::from(m) * spacing));
        }
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{density::errors::ErrorKind, quadrature::options::QuadOptions};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction guards and accessors.
    // - pdf reference values and behavior at ±∞.
    // - cdf limits, monotonicity and grid evaluation.
    // - Agreement between quadrature and closed-form integrals.
    // - Break point shape and quadrature failure reporting.
    // - Closed-form fallback for bandwidths quadrature cannot resolve.
    //
    // They intentionally DO NOT cover:
    // - Bandwidth search, tested in `bandwidth` and `tests/`.
    // -------------------------------------------------------------------------

    const SAMPLE: [f64; 5] = [1.0, 2.0, 2.5, 3.0, 8.0];

    fn naive_pdf(x: f64, h: f64) -> f64 {
        let norm = 1.0 / (h * (2.0 * std::f64::consts::PI).sqrt());
        SAMPLE.iter().map(|&xi| norm * (-0.5 * ((x - xi) / h).powi(2)).exp()).sum::<f64>()
            / SAMPLE.len() as f64
    }

    #[test]
    // Purpose
    // -------
    // Construction rejects degenerate samples.
    //
    // Given
    // -----
    // - Empty, single-element and NaN-containing samples.
    //
    // Expect
    // ------
    // - Errors of kind `InvalidInput`.
    fn new_rejects_degenerate_samples() {
        // Act / Assert
        for sample in [&[][..], &[1.0][..], &[1.0, f64::NAN][..]] {
            let err = DensityEstimator::new(sample).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "sample {sample:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // pdf matches the naive kernel sum at a hand-checked point.
    //
    // Given
    // -----
    // - Sample {1, 2, 2.5, 3, 8}, x = 2.5, h = 1.
    //
    // Expect
    // ------
    // - pdf(2.5, 1) equals the naive sum, ≈ 0.2465181.
    fn pdf_matches_kernel_sum() {
        // Arrange
        let kde = DensityEstimator::new(&SAMPLE).unwrap();

        // Act
        let value = kde.pdf(2.5, 1.0).unwrap();

        // Assert
        assert_relative_eq!(value, naive_pdf(2.5, 1.0), max_relative = 1e-14);
        assert_relative_eq!(value, 0.246_518_127_458_704_8, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Evaluation at ±∞ returns zero; NaN points and bad bandwidths fail.
    //
    // Given
    // -----
    // - x ∈ {±∞, NaN}, h ∈ {0, −1}.
    //
    // Expect
    // ------
    // - pdf(±∞) = 0, errors otherwise.
    fn pdf_edge_inputs() {
        // Arrange
        let kde = DensityEstimator::new(&SAMPLE).unwrap();

        // Act / Assert
        assert_eq!(kde.pdf(f64::INFINITY, 1.0).unwrap(), 0.0);
        assert_eq!(kde.pdf(f64::NEG_INFINITY, 1.0).unwrap(), 0.0);
        assert!(matches!(kde.pdf(f64::NAN, 1.0), Err(KdeError::InvalidEvaluationPoint { .. })));
        assert!(matches!(kde.pdf(1.0, 0.0), Err(KdeError::InvalidBandwidth { .. })));
        assert!(matches!(kde.cdf(1.0, -1.0), Err(KdeError::InvalidBandwidth { .. })));
    }

    #[test]
    // Purpose
    // -------
    // The quadrature CDF matches the closed form and reaches its limits.
    //
    // Given
    // -----
    // - Sample {1, 2, 2.5, 3, 8}, h = 0.6, several x including ±∞.
    //
    // Expect
    // ------
    // - |quadrature − closed form| < 1e-8; cdf(−∞) = 0; cdf(+∞) ≈ 1.
    fn cdf_quadrature_matches_closed_form() {
        // Arrange
        let quad = DensityEstimator::new(&SAMPLE).unwrap();
        let exact = DensityEstimator::with_options(&SAMPLE, EstimatorOptions::closed_form()).unwrap();
        let h = 0.6;

        for &x in &[-3.0, 0.5, 2.2, 2.5, 5.0, 8.0, 12.0] {
            // Act
            let a = quad.cdf(x, h).unwrap();
            let b = exact.cdf(x, h).unwrap();

            // Assert
            assert!((a - b).abs() < 1e-8, "x = {x}: quadrature {a}, closed form {b}");
        }
        assert_eq!(quad.cdf(f64::NEG_INFINITY, h).unwrap(), 0.0);
        assert_relative_eq!(quad.cdf(f64::INFINITY, h).unwrap(), 1.0, epsilon = 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // Total mass is one and the squared-density integral agrees across
    // strategies, including at a bandwidth far below the sample spacing.
    //
    // Given
    // -----
    // - h ∈ {1e-3, 0.3, 2.0}.
    //
    // Expect
    // ------
    // - total_mass ≈ 1 and squared_integral relative agreement 1e-7.
    fn integrals_agree_across_strategies() {
        // Arrange
        let quad = DensityEstimator::new(&SAMPLE).unwrap();
        let exact = DensityEstimator::with_options(&SAMPLE, EstimatorOptions::closed_form()).unwrap();

        for &h in &[1e-3, 0.3, 2.0] {
            // Act
            let mass = quad.total_mass(h).unwrap();
            let sq_quad = quad.squared_integral(h).unwrap();
            let sq_exact = exact.squared_integral(h).unwrap();

            // Assert
            assert_relative_eq!(mass, 1.0, epsilon = 1e-8);
            assert_relative_eq!(sq_quad, sq_exact, max_relative = 1e-7);
        }
    }

    #[test]
    // Purpose
    // -------
    // Grid helpers return one value per point in input order, and the CDF
    // grid is monotone in x.
    //
    // Given
    // -----
    // - Unsorted points with a duplicate.
    //
    // Expect
    // ------
    // - pdf_grid equals pointwise pdf; cdf_grid sorted by x is
    //   non-decreasing and matches pointwise cdf to 1e-8.
    fn grids_follow_input_order_and_are_monotone() {
        // Arrange
        let kde = DensityEstimator::new(&SAMPLE).unwrap();
        let xs = [4.0, -1.0, 2.5, 9.0, 2.5, 0.0];
        let h = 0.8;

        // Act
        let pdfs = kde.pdf_grid(&xs, h).unwrap();
        let cdfs = kde.cdf_grid(&xs, h).unwrap();

        // Assert
        for (i, &x) in xs.iter().enumerate() {
            assert_relative_eq!(pdfs[i], kde.pdf(x, h).unwrap(), max_relative = 1e-15);
            assert!((cdfs[i] - kde.cdf(x, h).unwrap()).abs() < 1e-8);
        }
        let mut pairs: Vec<(f64, f64)> = xs.iter().copied().zip(cdfs.iter().copied()).collect();
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        for w in pairs.windows(2) {
            assert!(w[1].1 >= w[0].1, "cdf decreased between {:?} and {:?}", w[0], w[1]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Break points cover ±8h around each observation with spacing 2h and
    // no duplicates.
    //
    // Given
    // -----
    // - Sample {1, 2, 2.5, 3, 8}, h = 0.25.
    //
    // Expect
    // ------
    // - Strictly increasing points; every observation has points within
    //   2h below xᵢ − 8h and above xᵢ + 8h.
    fn breakpoints_cover_every_observation() {
        // Arrange
        let kde = DensityEstimator::new(&SAMPLE).unwrap();
        let h = 0.25;

        // Act
        let points = kde.breakpoints(h);

        // Assert
        assert!(points.windows(2).all(|w| w[0] < w[1]));
        for &xi in &SAMPLE {
            assert!(points.iter().any(|&p| p <= xi - 8.0 * h && p > xi - 10.0 * h - 1e-12));
            assert!(points.iter().any(|&p| p >= xi + 8.0 * h && p < xi + 10.0 * h + 1e-12));
        }
    }

    #[test]
    // Purpose
    // -------
    // A quadrature budget too small for the requested accuracy surfaces as
    // an integration error.
    //
    // Given
    // -----
    // - One allowed bisection and absolute tolerance 1e-300, so the first
    //   partition cannot meet the target.
    //
    // Expect
    // ------
    // - `cdf` fails with kind `Integration`.
    fn quadrature_budget_exhaustion_is_reported() {
        // Arrange
        let quad = QuadOptions::new(1e-300, 0.0, 1).unwrap();
        let opts = EstimatorOptions::new(IntegralMethod::Quadrature, quad);
        let kde = DensityEstimator::with_options(&SAMPLE, opts).unwrap();

        // Act
        let err = kde.cdf(2.7, 0.5).unwrap_err();

        // Assert
        assert_eq!(err.kind(), ErrorKind::Integration, "got {err}");
    }

    #[test]
    // Purpose
    // -------
    // Break points stay bounded when `2h` is below the float spacing of the
    // observations.
    //
    // Given
    // -----
    // - Sample {1e9, 1e9 + 1}, h = 1e-17.
    //
    // Expect
    // ------
    // - At most 9 points per observation; here every `xᵢ + m·2h` rounds
    //   to `xᵢ`, leaving exactly the two observations.
    fn breakpoints_are_bounded_below_float_spacing() {
        // Arrange
        let kde = DensityEstimator::new(&[1e9, 1e9 + 1.0]).unwrap();

        // Act
        let points = kde.breakpoints(1e-17);

        // Assert
        assert!(points.len() <= 18);
        assert_eq!(points, vec![1e9, 1e9 + 1.0]);
    }

    #[test]
    // Purpose
    // -------
    // Bandwidths quadrature cannot resolve are integrated in closed form
    // rather than failing or running away.
    //
    // Given
    // -----
    // - Sample {0, 1} with default (quadrature) options.
    // - h = 1e-17, far below the float spacing near 1.
    // - h = 1e-200, where the squared density overflows.
    //
    // Expect
    // ------
    // - cdf(0.5) = 0.5 and ucv equal to the closed-form estimator's.
    // - squared_integral = 1/(2√π·n·h), total mass 1.
    fn unresolvable_bandwidths_use_closed_form() {
        // Arrange
        let sample = [0.0, 1.0];
        let quad = DensityEstimator::new(&sample).unwrap();
        let exact = DensityEstimator::with_options(&sample, EstimatorOptions::closed_form()).unwrap();
        let tiny = 1e-17;
        let overflowing = 1e-200;

        // Act
        let cdf_mid = quad.cdf(0.5, tiny).unwrap();
        let ucv_tiny = quad.ucv(tiny).unwrap();
        let sq = quad.squared_integral(overflowing).unwrap();
        let mass = quad.total_mass(overflowing).unwrap();

        // Assert
        assert_relative_eq!(cdf_mid, 0.5, max_relative = 1e-15);
        assert!(ucv_tiny.is_finite());
        assert_eq!(ucv_tiny, exact.ucv(tiny).unwrap());
        let expected = 1.0 / (2.0 * std::f64::consts::PI.sqrt() * 2.0 * overflowing);
        assert_relative_eq!(sq, expected, max_relative = 1e-12);
        assert_relative_eq!(mass, 1.0, epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // The estimator can be shared across threads.
    //
    // Given
    // -----
    // - The `DensityEstimator` type.
    //
    // Expect
    // ------
    // - It satisfies `Send + Sync` at compile time.
    fn estimator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DensityEstimator>();
    }
}
