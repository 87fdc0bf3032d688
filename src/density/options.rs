//! Estimator configuration: integration strategy and quadrature settings.
use crate::quadrature::options::QuadOptions;

/// How the estimator evaluates integrals of the density.
///
/// - `Quadrature`: adaptive Gauss–Kronrod over the real line, with break
///   points around the sample.
/// - `ClosedForm`: exact Gaussian identities (the CDF as a mean of kernel
///   CDFs, `∫f̂²` as a double sum of `√2·h` kernels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegralMethod {
    #[default]
    Quadrature,
    ClosedForm,
}

/// Options fixed at estimator construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimatorOptions {
    pub integral: IntegralMethod,
    pub quad: QuadOptions,
}

impl EstimatorOptions {
    pub fn new(integral: IntegralMethod, quad: QuadOptions) -> Self {
        Self { integral, quad }
    }

    /// Options selecting [`IntegralMethod::ClosedForm`].
    pub fn closed_form() -> Self {
        Self { integral: IntegralMethod::ClosedForm, ..Self::default() }
    }
}
