//! scalar_optimizer::run — executor wiring for a single solver run.
//!
//! Purpose
//! -------
//! Drive one argmin run to completion and normalize its final state into a
//! [`ScalarOutcome`] expressed in the solver's own coordinate (`ln x` for
//! Brent, `θ₀` for L-BFGS). Mapping back to `x` happens in `api`.
//!
//! Key behaviors
//! -------------
//! - Applies the iteration cap from [`SearchOptions`].
//! - With `verbose`, both solvers log the starting point and its cost at
//!   `debug` level. When the `obs_slog` feature is enabled, argmin's slog
//!   terminal observer is also attached for per-iteration output.
//! - Backend errors are converted into [`OptError`](crate::optimization::errors::OptError)
//!   through its `From<argmin::core::Error>` impl, so objective failures
//!   come back as the variant the objective raised.
use crate::optimization::{
    errors::OptResult,
    scalar_optimizer::{
        adapter::{LogScaleAdapter, SoftplusAdapter},
        traits::{ScalarObjective, ScalarOutcome, SearchOptions},
        types::{Brent, ScalarState, Theta, VectorState},
    },
};
use argmin::core::{CostFunction, Executor, Gradient, Solver, State};
use argmin_math::ArgminL2Norm;

/// Run Brent on the log-scale problem. `u0` is the starting `ln x`, used
/// only for the verbose initial-state record.
pub fn run_brent<'a, F>(
    u0: f64, opts: &SearchOptions, problem: LogScaleAdapter<'a, F>, solver: Brent,
) -> OptResult<ScalarOutcome>
where
    F: ScalarObjective,
{
    if opts.verbose {
        log_initial_cost(u0, &problem);
    }
    let max_iter = opts.tols.max_iter as u64;
    #[allow(unused_mut)]
    let mut optimizer =
        Executor::new(problem, solver).configure(|state: ScalarState| state.max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    ScalarOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        &termination,
        iterations,
        function_counts,
        None,
    )
}

/// Run an L-BFGS solver on the softplus problem starting from `theta0`.
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &SearchOptions, problem: SoftplusAdapter<'a, F>, solver: S,
) -> OptResult<ScalarOutcome>
where
    F: ScalarObjective,
    S: Solver<SoftplusAdapter<'a, F>, VectorState> + Send + 'static,
{
    if opts.verbose {
        log_initial_state(&theta0, &problem);
    }
    let max_iter = opts.tols.max_iter as u64;
    #[allow(unused_mut)]
    let mut optimizer = Executor::new(problem, solver)
        .configure(|state: VectorState| state.param(theta0).max_iters(max_iter));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let theta_hat = result.take_best_param().and_then(|t| t.first().copied());
    ScalarOutcome::new(
        theta_hat,
        result.get_best_cost(),
        &termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper Methods ----

fn log_initial_cost<F>(u0: f64, problem: &LogScaleAdapter<'_, F>)
where
    F: ScalarObjective,
{
    let x0 = problem.to_x(u0);
    match problem.cost(&u0) {
        Ok(c0) => log::debug!("brent init: x0 = {x0:.6e}, cost = {c0:.6e}"),
        Err(err) => log::debug!("brent init: x0 = {x0:.6e}, cost evaluation failed: {err}"),
    }
}

fn log_initial_state<F>(theta0: &Theta, problem: &SoftplusAdapter<'_, F>)
where
    F: ScalarObjective,
{
    let x0 = theta0.first().map(|&t| problem.to_x(t));
    match problem.cost(theta0) {
        Ok(c0) => {
            let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());
            log::debug!(
                "lbfgs init: x0 = {:?}, cost = {:.6}{}",
                x0,
                c0,
                g0n.map(|n| format!(", ||grad|| = {n:.6}")).unwrap_or_default()
            );
        }
        Err(err) => log::debug!("lbfgs init: x0 = {x0:?}, cost evaluation failed: {err}"),
    }
}
