//! scalar_optimizer::api — bounded minimization on a half-line.
//!
//! Purpose
//! -------
//! Minimize a [`ScalarObjective`] over `[lower, ∞)` from a starting point,
//! hiding the choice of solver and coordinate system behind one call.
//!
//! Key behaviors
//! -------------
//! - Brent searches `u = ln x` on the bracket
//!   `[ln max(lower, start/10³), ln(start·10³)]`. When the minimizer lands
//!   within [`EDGE_TOLERANCE`] of an edge that can still move, that edge is
//!   pushed out by another factor of 10³ (never below `lower`) and the
//!   search is rerun, at most [`MAX_BRACKET_EXPANSIONS`] times. Iterations
//!   and evaluation counters are summed over all runs and the run with the
//!   lowest cost wins.
//! - L-BFGS searches `θ` with `x = lower + start·softplus(θ)` starting from
//!   the `θ` that maps to `start`.
//! - The returned `x_hat` is never below `lower`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `lower` is finite and `> 0`; `start` is finite and `> lower`.
//! - When the final run does not report convergence the call fails with
//!   [`OptError::NotConverged`] unless `best_effort` is set.
//!
//! Testing notes
//! -------------
//! - Unit tests minimize smooth toy objectives with both solvers, check
//!   bracket expansion toward both edges, and cover the iteration cap with
//!   and without `best_effort`.
use crate::optimization::{
    errors::{OptError, OptResult},
    numerical_stability::{from_shifted_positive, to_shifted_positive},
    scalar_optimizer::{
        adapter::{LogScaleAdapter, SoftplusAdapter},
        builders::{build_brent, build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::{run_brent, run_lbfgs},
        traits::{LineSearcher, ScalarObjective, ScalarOutcome, SearchMethod, SearchOptions},
        types::{FnEvalMap, Theta},
        validation::verify_domain,
    },
};

/// Multiplicative half-width of the initial Brent bracket and of each
/// expansion step.
pub const BRACKET_FACTOR: f64 = 1e3;

/// Maximum number of bracket expansions after the first Brent run.
pub const MAX_BRACKET_EXPANSIONS: usize = 4;

/// Distance in `ln x` below which a Brent minimizer counts as on the edge.
pub const EDGE_TOLERANCE: f64 = 1e-3;

/// Minimize `f` over `[lower, ∞)` starting from `start`.
///
/// Parameters
/// ----------
/// - `f`: objective; errors it raises abort the search and are returned.
/// - `lower`: finite, strictly positive lower bound of the domain.
/// - `start`: finite starting point with `start > lower`.
/// - `opts`: solver choice, tolerances and failure policy.
///
/// Returns
/// -------
/// [`ScalarOutcome`] with `x_hat ≥ lower` and `value = f(x_hat)` as seen by
/// the solver.
///
/// Errors
/// ------
/// - [`OptError::InvalidLowerBound`] / [`OptError::InvalidStart`] for an
///   invalid domain, plus whatever `f.check(start)` returns.
/// - Errors raised by `f` during the search.
/// - [`OptError::NotConverged`] when the solver stops on the iteration cap
///   and `opts.best_effort` is `false`.
/// - Backend errors from argmin, mapped into `OptError`.
pub fn minimize<F: ScalarObjective>(
    f: &F, lower: f64, start: f64, opts: &SearchOptions,
) -> OptResult<ScalarOutcome> {
    verify_domain(lower, start)?;
    f.check(start)?;

    let mut outcome = match opts.method {
        SearchMethod::Brent => minimize_brent(f, lower, start, opts)?,
        SearchMethod::Lbfgs(line_searcher) => {
            minimize_lbfgs(f, lower, start, line_searcher, opts)?
        }
    };
    outcome.x_hat = outcome.x_hat.max(lower);

    if !outcome.converged && !opts.best_effort {
        return Err(OptError::NotConverged {
            iterations: outcome.iterations,
            status: outcome.status,
        });
    }
    Ok(outcome)
}

fn minimize_brent<F: ScalarObjective>(
    f: &F, lower: f64, start: f64, opts: &SearchOptions,
) -> OptResult<ScalarOutcome> {
    let mut lo = lower.max(start / BRACKET_FACTOR);
    let mut hi = start * BRACKET_FACTOR;
    let mut best: Option<ScalarOutcome> = None;
    let mut total_iterations = 0;
    let mut total_evals = FnEvalMap::new();

    for expansion in 0..=MAX_BRACKET_EXPANSIONS {
        let problem = LogScaleAdapter::new(f);
        let solver = build_brent(lo.ln(), hi.ln(), opts);
        let u0 = start.ln().clamp(lo.ln(), hi.ln());
        let run = run_brent(u0, opts, problem, solver)?;
        let u = run.x_hat;
        log::debug!(
            "brent run {expansion}: bracket [{lo:.6e}, {hi:.6e}], x = {:.6e}, cost = {:.8e}, {}",
            u.exp(),
            run.value,
            run.status
        );

        total_iterations += run.iterations;
        for (key, count) in &run.fn_evals {
            *total_evals.entry(key.clone()).or_insert(0) += count;
        }
        let at_upper = hi.ln() - u < EDGE_TOLERANCE;
        let at_lower = lo > lower && u - lo.ln() < EDGE_TOLERANCE;
        let converged = run.converged;
        let run = ScalarOutcome { x_hat: u.exp(), ..run };
        best = match best {
            Some(prev) if prev.value <= run.value => Some(prev),
            _ => Some(run),
        };

        if !converged || !(at_upper || at_lower) {
            break;
        }
        if at_upper {
            hi *= BRACKET_FACTOR;
        }
        if at_lower {
            lo = lower.max(lo / BRACKET_FACTOR);
        }
        log::debug!("minimizer on bracket edge; widening to [{lo:.6e}, {hi:.6e}]");
    }

    let mut outcome = best.ok_or(OptError::MissingEstimate)?;
    outcome.iterations = total_iterations;
    outcome.fn_evals = total_evals;
    Ok(outcome)
}

fn minimize_lbfgs<F: ScalarObjective>(
    f: &F, lower: f64, start: f64, line_searcher: LineSearcher, opts: &SearchOptions,
) -> OptResult<ScalarOutcome> {
    let scale = start;
    let theta0 = Theta::from_elem(1, from_shifted_positive(start, lower, scale));
    let problem = SoftplusAdapter::new(f, lower, scale);
    let mut outcome = match line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)?
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)?
        }
    };
    outcome.x_hat = to_shifted_positive(outcome.x_hat, lower, scale);
    log::debug!(
        "lbfgs ({line_searcher:?}): x = {:.6e}, cost = {:.8e}, {}",
        outcome.x_hat,
        outcome.value,
        outcome.status
    );
    Ok(outcome)
}
