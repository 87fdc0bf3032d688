//! optimization — scalar minimizer, stable transforms, unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer behind bandwidth selection: an
//! argmin-backed minimizer for positive scalars, the numerically stable
//! reparametrisations it relies on, and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `scalar_optimizer`: minimize a [`ScalarObjective`](scalar_optimizer::ScalarObjective)
//!   over `[lower, ∞)` with Brent or L-BFGS.
//! - `numerical_stability`: softplus maps between ℝ and a shifted
//!   half-line.
//! - `errors`: [`OptError`](errors::OptError) normalizes configuration
//!   issues, numerical failures and argmin backend errors, with the
//!   [`OptResult`](errors::OptResult) alias.
//!
//! Invariants & assumptions
//! ------------------------
//! - Invalid options and domains are rejected before any solver runs.
//! - Callers never see raw argmin errors.
//!
//! Conventions
//! -----------
//! - All solvers minimize; objectives return costs.
//! - Progress is reported through the `log` facade only when
//!   `verbose` is set; argmin's slog observer is available behind the
//!   `obs_slog` feature.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; `density` tests exercise the
//!   layer end to end on the UCV criterion.
pub mod errors;
pub mod numerical_stability;
pub mod scalar_optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_kde::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
    pub use super::scalar_optimizer::prelude::*;
}
