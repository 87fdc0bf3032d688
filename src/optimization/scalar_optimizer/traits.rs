//! scalar_optimizer::traits — objective trait, options and outcome.
//!
//! Purpose
//! -------
//! Define the contract between callers and the scalar minimizer: what an
//! objective must provide, how a search is configured, and what a search
//! reports back.
//!
//! Key behaviors
//! -------------
//! - [`ScalarObjective`] evaluates a cost at a point of the half-line
//!   `[lower, ∞)` and may reject points it cannot handle.
//! - [`SearchMethod`] and [`LineSearcher`] select the solver; both parse
//!   case-insensitively from strings.
//! - [`Tolerances`] and [`SearchOptions`] validate eagerly in `new` and
//!   provide defaults.
//! - [`ScalarOutcome`] normalizes argmin's final state into a minimizer,
//!   its cost, a convergence flag and counters.
//!
//! Invariants & assumptions
//! ------------------------
//! - `converged` is `true` only when argmin reports
//!   `SolverConverged` or `TargetCostReached`; hitting the iteration cap is
//!   not convergence.
//! - `x_hat` and `value` are finite in every constructed outcome.
//!
//! Testing notes
//! -------------
//! - Unit tests cover option validation, string parsing and the mapping of
//!   termination statuses.
use crate::optimization::{
    errors::{OptError, OptResult},
    scalar_optimizer::{
        types::{Cost, FnEvalMap, Grad},
        validation::{validate_estimate, validate_value, verify_max_iter, verify_tolerance},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Cost function over a positive scalar.
pub trait ScalarObjective {
    // Required methods
    fn value(&self, x: f64) -> OptResult<Cost>;

    // Optional methods
    fn check(&self, x: f64) -> OptResult<()> {
        if !x.is_finite() {
            return Err(OptError::InvalidStart { value: x, reason: "Start must be finite." });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Solver used by [`minimize`](crate::optimization::scalar_optimizer::minimize).
///
/// - `Brent`: derivative-free bounded search on `ln x`, widening the bracket
///   when the minimizer sits on its edge.
/// - `Lbfgs`: quasi-Newton search on a softplus reparametrisation with
///   finite-difference gradients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMethod {
    #[default]
    Brent,
    Lbfgs(LineSearcher),
}

impl FromStr for SearchMethod {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "brent" => Ok(SearchMethod::Brent),
            "lbfgs" => Ok(SearchMethod::Lbfgs(LineSearcher::MoreThuente)),
            other => match other.parse::<LineSearcher>() {
                Ok(ls) => Ok(SearchMethod::Lbfgs(ls)),
                Err(_) => Err(OptError::InvalidSearchMethod {
                    name: s.to_string(),
                    reason: "Valid options are case insensitive 'Brent', 'LBFGS', \
                             'MoreThuente' or 'HagerZhang'.",
                }),
            },
        }
    }
}

/// Stopping rules shared by both solvers.
///
/// - `tolerance`: Brent's absolute tolerance on `ln x`; L-BFGS's gradient
///   norm tolerance.
/// - `max_iter`: iteration cap per solver run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tolerance: f64,
    pub max_iter: usize,
}

impl Tolerances {
    pub fn new(tolerance: f64, max_iter: usize) -> OptResult<Self> {
        verify_tolerance(tolerance)?;
        verify_max_iter(max_iter)?;
        Ok(Self { tolerance, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tolerance: 1e-6, max_iter: 500 }
    }
}

/// Full configuration of a scalar search.
///
/// - `best_effort`: return the best point found even when the solver stops
///   without converging.
/// - `verbose`: emit the initial state through `log` and, with the
///   `obs_slog` feature, attach argmin's terminal observer.
/// - `lbfgs_mem`: L-BFGS history length; `None` uses
///   [`DEFAULT_LBFGS_MEM`](crate::optimization::scalar_optimizer::DEFAULT_LBFGS_MEM).
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub tols: Tolerances,
    pub method: SearchMethod,
    pub best_effort: bool,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl SearchOptions {
    pub fn new(
        tols: Tolerances, method: SearchMethod, best_effort: bool, verbose: bool,
        lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, method, best_effort, verbose, lbfgs_mem })
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            method: SearchMethod::Brent,
            best_effort: false,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Normalized result of a scalar search.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarOutcome {
    pub x_hat: f64,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl ScalarOutcome {
    pub fn new(
        x_hat_opt: Option<f64>, value: f64, status: &TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let x_hat = validate_estimate(x_hat_opt)?;
        validate_value(value)?;
        let converged = matches!(
            status,
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            )
        );
        let status = match status {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            TerminationStatus::Terminated(reason) => format!("{reason:?}"),
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { x_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }

    /// Total number of cost evaluations across all counters containing
    /// `"cost"`.
    pub fn cost_evaluations(&self) -> u64 {
        self.fn_evals.iter().filter(|(k, _)| k.contains("cost")).map(|(_, v)| *v).sum()
    }
}
