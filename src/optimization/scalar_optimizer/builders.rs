//! Solver construction for the Brent and L-BFGS search paths.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    scalar_optimizer::{
        traits::SearchOptions,
        types::{
            Brent, Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Bounded Brent minimizer on `[lo, hi]` in log coordinates.
///
/// The relative tolerance is `√ε`; `opts.tols.tolerance` is the absolute
/// tolerance on the log coordinate.
pub fn build_brent(lo: f64, hi: f64, opts: &SearchOptions) -> Brent {
    Brent::new(lo, hi).set_tolerance(f64::EPSILON.sqrt(), opts.tols.tolerance)
}

pub fn build_optimizer_hager_zhang(opts: &SearchOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

pub fn build_optimizer_more_thuente(opts: &SearchOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply the gradient-norm tolerance to an L-BFGS solver.
pub fn configure_lbfgs<L>(
    solver: LBFGS<L, Theta, Grad, Cost>, opts: &SearchOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    Ok(solver.with_tolerance_grad(opts.tols.tolerance)?)
}
