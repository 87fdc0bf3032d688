//! numerical_stability — stable reparametrisations for bounded searches.
//!
//! Purpose
//! -------
//! Map an unconstrained optimizer coordinate onto a half-line
//! `(lower, ∞)` without overflow or underflow, so gradient-based solvers
//! can search over strictly positive quantities such as bandwidths.
//!
//! Conventions
//! -----------
//! - Pure `f64` helpers with no I/O, logging or allocation.
//! - Inputs are assumed finite; domain checks live in the optimizer layer.
pub mod transformations;

pub use self::transformations::{
    SOFTPLUS_LINEAR_CUTOFF, from_shifted_positive, safe_softplus, safe_softplus_inv,
    to_shifted_positive,
};

pub mod prelude {
    pub use super::transformations::{
        from_shifted_positive, safe_softplus, safe_softplus_inv, to_shifted_positive,
    };
}
