//! scalar_optimizer::types — numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Keep the argmin generics used by the scalar optimizer in one place so
//! the adapters, builders and runners can name solvers and states without
//! repeating type parameters.
//!
//! Conventions
//! -----------
//! - The Brent path works directly on a scalar `f64` coordinate.
//! - The L-BFGS path needs vector-shaped parameters; it uses length-one
//!   [`Theta`] arrays so that `finitediff` and argmin's `ndarray` backend
//!   apply unchanged.
//! - `DEFAULT_LBFGS_MEM` is the history size used when no explicit memory
//!   is configured.
use argmin::{
    core::IterState,
    solver::{
        brent::BrentOpt,
        linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
        quasinewton::LBFGS,
    },
};
use ndarray::Array1;
use std::collections::HashMap;

/// Unconstrained coordinate vector for gradient-based solvers.
pub type Theta = Array1<f64>;

/// Gradient with the same shape as [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// Function-evaluation counters reported by argmin (e.g. `"cost_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Default L-BFGS history length.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;

/// Bounded Brent minimizer on a scalar coordinate.
pub type Brent = BrentOpt<Cost>;

/// Solver state for the Brent path.
pub type ScalarState = IterState<Cost, (), (), (), (), Cost>;

/// Solver state for the L-BFGS path.
pub type VectorState = IterState<Theta, Grad, (), (), (), Cost>;
