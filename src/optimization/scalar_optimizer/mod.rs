//! scalar_optimizer — argmin-backed minimization over `[lower, ∞)`.
//!
//! Purpose
//! -------
//! Minimize a scalar objective over a half-line with a small, validated
//! surface. Callers implement [`ScalarObjective`], choose
//! [`SearchOptions`], and receive a [`ScalarOutcome`] without touching
//! argmin generics.
//!
//! Key behaviors
//! -------------
//! - Two solvers: bounded Brent on `ln x` with bracket expansion (default),
//!   and L-BFGS on a softplus reparametrisation with finite-difference
//!   gradients and a choice of More–Thuente or Hager–Zhang line search.
//! - Objective errors abort the search and reach the caller as the
//!   [`OptError`](crate::optimization::errors::OptError) the objective
//!   raised.
//! - Non-convergence is an error unless `best_effort` is set.
//!
//! Conventions
//! -----------
//! - Submodules mirror the pipeline: `types` (aliases), `traits`
//!   (contract and options), `validation`, `adapter` (argmin problems),
//!   `builders` (solvers), `run` (executor), `api` (entry point).
//!
//! Downstream usage
//! ----------------
//! - `density::bandwidth` minimizes the UCV criterion through
//!   [`minimize`].
pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{
    LineSearcher, ScalarObjective, ScalarOutcome, SearchMethod, SearchOptions, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{
        LineSearcher, ScalarObjective, ScalarOutcome, SearchMethod, SearchOptions, Tolerances,
    };
}
