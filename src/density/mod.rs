//! density — Gaussian kernel density estimation with UCV bandwidths.
//!
//! Purpose
//! -------
//! Estimate a univariate density from a finite sample with a Gaussian
//! kernel, and pick the bandwidth by minimizing the unbiased
//! cross-validation criterion.
//!
//! Key behaviors
//! -------------
//! - [`estimator`]: [`DensityEstimator`] owns a validated sample and
//!   evaluates the density, CDF, total mass and squared-density integral
//!   for any bandwidth.
//! - [`cross_validation`]: the UCV score and its optimizer adapter.
//! - [`bandwidth`]: rule-of-thumb start and the UCV search.
//! - [`kernel`]: the Gaussian kernel and its CDF.
//! - [`options`], [`validation`], [`errors`]: configuration, input checks
//!   and the [`KdeError`] surface.
//!
//! Invariants & assumptions
//! ------------------------
//! - Samples have at least two observations, all finite.
//! - Bandwidths are finite and strictly positive.
//! - No state changes after construction; estimators are `Send + Sync`.
//!
//! Conventions
//! -----------
//! - Integrals use adaptive quadrature by default; closed-form Gaussian
//!   identities are available through [`IntegralMethod::ClosedForm`].
//! - Errors carry a coarse [`ErrorKind`] for callers that only branch on
//!   the failure class.
pub mod bandwidth;
pub mod cross_validation;
pub mod errors;
pub mod estimator;
pub mod kernel;
pub mod options;
pub mod validation;

pub use self::bandwidth::{BandwidthOptions, BandwidthOutcome, rule_of_thumb};
pub use self::cross_validation::{UcvObjective, leave_one_out_mean, ucv_score};
pub use self::errors::{ErrorKind, KdeError, KdeResult};
pub use self::estimator::DensityEstimator;
pub use self::kernel::{gaussian_kernel, gaussian_kernel_cdf};
pub use self::options::{EstimatorOptions, IntegralMethod};

pub mod prelude {
    pub use super::bandwidth::{BandwidthOptions, BandwidthOutcome};
    pub use super::errors::{ErrorKind, KdeError, KdeResult};
    pub use super::estimator::DensityEstimator;
    pub use super::options::{EstimatorOptions, IntegralMethod};
}
