//! quadrature::integrator — globally adaptive Gauss–Kronrod integration.
//!
//! Purpose
//! -------
//! Integrate a scalar function over finite, semi-infinite, or doubly
//! infinite intervals to a requested accuracy, failing loudly when the
//! accuracy cannot be reached within the subdivision budget.
//!
//! Key behaviors
//! -------------
//! - The interval is split at caller-supplied break points before any
//!   adaptive work starts. Each resulting piece becomes one initial panel.
//! - Infinite pieces are mapped onto `(0, 1]` with
//!   `x = anchor ± scale·(1 − t)/t`, `dx = scale/t² dt`. The anchor is the
//!   finite end of the piece and `scale` is the configured tail scale.
//! - A doubly infinite interval with no interior break points is split at
//!   the origin.
//! - The adaptive loop bisects the panel with the largest error estimate
//!   until the summed error is at most `max(abs_tol, rel_tol·|estimate|)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Break points outside the open interval, non-finite break points and
//!   duplicates are ignored.
//! - The integrand is never evaluated at panel endpoints, so the tail maps
//!   never evaluate `t = 0`.
//!
//! Downstream usage
//! ----------------
//! - `density::estimator` integrates the density (CDF, total mass) and the
//!   squared density with break points around every observation.
//!
//! Testing notes
//! -------------
//! - Unit tests cover polynomial and Gaussian integrals over every interval
//!   shape, interval validation, break point handling, and both failure
//!   modes of the adaptive loop.
use crate::quadrature::{
    errors::{QuadError, QuadResult},
    gauss_kronrod::{NODES_PER_PANEL, PanelEstimate, kronrod_15},
    options::QuadOptions,
};

/// Summary of a successful integration.
///
/// - `value`: the integral estimate.
/// - `abs_error`: summed panel error estimates.
/// - `panels`: number of panels in the final partition.
/// - `evaluations`: integrand evaluations performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadOutcome {
    pub value: f64,
    pub abs_error: f64,
    pub panels: usize,
    pub evaluations: usize,
}

/// Variable change applied on one piece of the interval.
#[derive(Debug, Clone, Copy, PartialEq)]
enum PanelMap {
    Identity,
    LowerTail { anchor: f64, scale: f64 },
    UpperTail { anchor: f64, scale: f64 },
}

impl PanelMap {
    /// Returns `(x, f(x)·dx/dt)` for the mapped variable `t`.
    #[inline]
    fn apply<F: Fn(f64) -> f64>(&self, f: &F, t: f64) -> (f64, f64) {
        match *self {
            PanelMap::Identity => (t, f(t)),
            PanelMap::LowerTail { anchor, scale } => {
                let x = anchor - scale * (1.0 - t) / t;
                (x, tail_value(f(x), scale, t))
            }
            PanelMap::UpperTail { anchor, scale } => {
                let x = anchor + scale * (1.0 - t) / t;
                (x, tail_value(f(x), scale, t))
            }
        }
    }
}

#[inline]
fn tail_value(fx: f64, scale: f64, t: f64) -> f64 {
    // A vanished integrand stays zero even where the Jacobian overflows.
    if fx == 0.0 { 0.0 } else { fx * scale / (t * t) }
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    map: PanelMap,
    lo: f64,
    hi: f64,
    estimate: PanelEstimate,
}

/// Adaptive integrator configured with tolerances, break points and a tail
/// scale.
///
/// Construct with [`Integrator::new`] and refine with the builder-style
/// setters. The integrator holds no per-call state and can be reused.
#[derive(Debug, Clone, PartialEq)]
pub struct Integrator {
    opts: QuadOptions,
    breakpoints: Vec<f64>,
    tail_scale: f64,
}

impl Integrator {
    pub fn new(opts: QuadOptions) -> Self {
        Self { opts, breakpoints: Vec::new(), tail_scale: 1.0 }
    }

    /// Replace the break points used to pre-split the interval.
    pub fn with_breakpoints(mut self, breakpoints: Vec<f64>) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    /// Set the length scale of the tail maps on infinite pieces.
    ///
    /// # Errors
    /// - [`QuadError::InvalidTailScale`] unless `scale` is finite and `> 0`.
    pub fn with_tail_scale(mut self, scale: f64) -> QuadResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(QuadError::InvalidTailScale {
                scale,
                reason: "Tail scale must be finite and strictly positive.",
            });
        }
        self.tail_scale = scale;
        Ok(self)
    }

    pub fn options(&self) -> &QuadOptions {
        &self.opts
    }

    /// Integrate `f` over `[lower, upper]`.
    ///
    /// Parameters
    /// ----------
    /// - `f`: integrand; must be finite wherever it is evaluated.
    /// - `lower`, `upper`: bounds with `lower ≤ upper`; either may be
    ///   infinite in its own direction.
    ///
    /// Returns
    /// -------
    /// [`QuadOutcome`] with the estimate and diagnostic counters. An empty
    /// interval (`lower == upper`) integrates to zero without evaluating `f`.
    ///
    /// Errors
    /// ------
    /// - [`QuadError::InvalidInterval`] for NaN or reversed bounds, or
    ///   `lower = +∞` / `upper = −∞`.
    /// - [`QuadError::NonFiniteIntegrand`] if `f` returns NaN or ±∞.
    /// - [`QuadError::SubdivisionLimit`] if the error target is not met
    ///   within `max_subdivisions` bisections.
    /// - [`QuadError::RoundoffDetected`] if the worst panel can no longer be
    ///   bisected in floating point.
    pub fn integrate<F>(&self, f: F, lower: f64, upper: f64) -> QuadResult<QuadOutcome>
    where
        F: Fn(f64) -> f64,
    {
        validate_interval(lower, upper)?;
        if lower == upper {
            return Ok(QuadOutcome { value: 0.0, abs_error: 0.0, panels: 0, evaluations: 0 });
        }

        let mut panels = self.initial_panels(&f, lower, upper)?;
        let mut evaluations = panels.len() * NODES_PER_PANEL;
        let mut bisections = 0usize;

        loop {
            let (value, abs_error) = totals(&panels);
            if abs_error <= self.opts.target(value) {
                return Ok(QuadOutcome { value, abs_error, panels: panels.len(), evaluations });
            }
            if bisections >= self.opts.max_subdivisions {
                return Err(QuadError::SubdivisionLimit {
                    limit: self.opts.max_subdivisions,
                    estimate: value,
                    error: abs_error,
                });
            }

            let worst = worst_panel(&panels);
            let panel = panels.swap_remove(worst);
            let mid = 0.5 * (panel.lo + panel.hi);
            if !(panel.lo < mid && mid < panel.hi) {
                return Err(QuadError::RoundoffDetected {
                    lower: panel.lo,
                    upper: panel.hi,
                    estimate: value,
                    error: abs_error,
                });
            }

            panels.push(evaluate(&f, panel.map, panel.lo, mid)?);
            panels.push(evaluate(&f, panel.map, mid, panel.hi)?);
            evaluations += 2 * NODES_PER_PANEL;
            bisections += 1;
        }
    }

    fn initial_panels<F>(&self, f: &F, lower: f64, upper: f64) -> QuadResult<Vec<Panel>>
    where
        F: Fn(f64) -> f64,
    {
        let mut interior: Vec<f64> = self
            .breakpoints
            .iter()
            .copied()
            .filter(|b| b.is_finite() && *b > lower && *b < upper)
            .collect();
        interior.sort_by(f64::total_cmp);
        interior.dedup();
        if interior.is_empty() && lower.is_infinite() && upper.is_infinite() {
            interior.push(0.0);
        }

        let mut nodes = Vec::with_capacity(interior.len() + 2);
        nodes.push(lower);
        nodes.extend(interior);
        nodes.push(upper);

        let scale = self.tail_scale;
        nodes
            .windows(2)
            .map(|w| {
                let (a, b) = (w[0], w[1]);
                if a == f64::NEG_INFINITY {
                    evaluate(f, PanelMap::LowerTail { anchor: b, scale }, 0.0, 1.0)
                } else if b == f64::INFINITY {
                    evaluate(f, PanelMap::UpperTail { anchor: a, scale }, 0.0, 1.0)
                } else {
                    evaluate(f, PanelMap::Identity, a, b)
                }
            })
            .collect()
    }
}

impl Default for Integrator {
    fn default() -> Self {
        Self::new(QuadOptions::default())
    }
}

fn validate_interval(lower: f64, upper: f64) -> QuadResult<()> {
    let reversed = lower > upper;
    let wrong_infinity = lower == f64::INFINITY || upper == f64::NEG_INFINITY;
    if lower.is_nan() || upper.is_nan() || reversed || wrong_infinity {
        return Err(QuadError::InvalidInterval { lower, upper });
    }
    Ok(())
}

fn evaluate<F>(f: &F, map: PanelMap, lo: f64, hi: f64) -> QuadResult<Panel>
where
    F: Fn(f64) -> f64,
{
    let g = |t: f64| map.apply(f, t);
    let estimate = kronrod_15(&g, lo, hi)?;
    Ok(Panel { map, lo, hi, estimate })
}

fn totals(panels: &[Panel]) -> (f64, f64) {
    panels
        .iter()
        .fold((0.0, 0.0), |(v, e), p| (v + p.estimate.value, e + p.estimate.error))
}

fn worst_panel(panels: &[Panel]) -> usize {
    let mut worst = 0;
    for (idx, panel) in panels.iter().enumerate().skip(1) {
        if panel.estimate.error > panels[worst].estimate.error {
            worst = idx;
        }
    }
    worst
}
