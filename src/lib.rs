//! rust_kde — Gaussian kernel density estimation with UCV bandwidth selection.
//!
//! Purpose
//! -------
//! Serve as the crate root: estimate a univariate density from a sample with
//! a Gaussian kernel and choose the bandwidth by minimizing the unbiased
//! (least-squares) cross-validation criterion.
//!
//! Key behaviors
//! -------------
//! - `density`: the estimator, the UCV criterion and bandwidth search.
//! - `quadrature`: adaptive Gauss–Kronrod integration on finite,
//!   semi-infinite and infinite intervals.
//! - `optimization`: an argmin-backed scalar minimizer over `[lower, ∞)`
//!   with Brent and L-BFGS solvers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Estimators own an immutable copy of their sample; the bandwidth is an
//!   argument to every operation and is never cached.
//! - Numerical failures (integration budget, non-convergence) are reported
//!   as errors, never as silently inaccurate values.
//!
//! Conventions
//! -----------
//! - All numerics are `f64`.
//! - Each layer has its own error enum (`QuadError`, `OptError`) which
//!   `KdeError` wraps at the density boundary.
//! - Diagnostics go through the `log` facade; install any logger to see
//!   them.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use rust_kde::prelude::*;
//!
//! let sample = [1.0, 2.0, 2.5, 3.0, 8.0];
//! let kde = DensityEstimator::new(&sample)?;
//! let h = kde.find_bandwidth(&BandwidthOptions::default())?;
//! let density_at_3 = kde.pdf(3.0, h)?;
//! # Ok::<(), KdeError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` exercises the full
//!   pipeline from sample to selected bandwidth.
pub mod density;
pub mod optimization;
pub mod quadrature;

pub mod prelude {
    pub use crate::density::prelude::*;
    pub use crate::optimization::scalar_optimizer::{LineSearcher, SearchMethod};
    pub use crate::quadrature::options::QuadOptions;
}
