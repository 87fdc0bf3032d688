//! quadrature — adaptive Gauss–Kronrod integration on ℝ.
//!
//! Purpose
//! -------
//! Provide the numerical integrator behind the density estimator's CDF,
//! total-mass and squared-density integrals. The routine is globally
//! adaptive, supports semi-infinite and infinite intervals through tail
//! maps, and reports failure instead of returning an inaccurate value.
//!
//! Key behaviors
//! -------------
//! - [`gauss_kronrod`]: the G7/K15 panel rule and its error estimate.
//! - [`integrator`]: break point splitting, tail maps and the adaptive loop.
//! - [`options`]: validated tolerances and the subdivision budget.
//! - [`errors`]: [`QuadError`] and the [`QuadResult`] alias.
//!
//! Conventions
//! -----------
//! - All numerics are `f64`.
//! - Integration is deterministic: the same integrand, options and break
//!   points always produce the same partition and estimate.
pub mod errors;
pub mod gauss_kronrod;
pub mod integrator;
pub mod options;

pub use self::errors::{QuadError, QuadResult};
pub use self::integrator::{Integrator, QuadOutcome};
pub use self::options::QuadOptions;

pub mod prelude {
    pub use super::errors::{QuadError, QuadResult};
    pub use super::integrator::{Integrator, QuadOutcome};
    pub use super::options::QuadOptions;
}
