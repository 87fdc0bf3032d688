//! density::bandwidth — rule-of-thumb start and UCV bandwidth search.
//!
//! Purpose
//! -------
//! Choose the bandwidth that minimizes the unbiased cross-validation
//! criterion over `[lower_bound, ∞)`, starting from Silverman's rule of
//! thumb.
//!
//! Key behaviors
//! -------------
//! - [`rule_of_thumb`]: `h₀ = 0.9·min(sd, IQR/1.34)·n^(−1/5)` with the
//!   sample standard deviation (n − 1 denominator) and the statrs
//!   interquartile range. A zero or non-finite spread estimate is skipped;
//!   if neither is usable the spread is 1.
//! - [`select`]: minimizes UCV from `max(h₀, 2·lower_bound)` with the
//!   configured [`SearchOptions`] and reports a [`BandwidthOutcome`].
//!   An error raised while evaluating UCV is returned as-is rather than as
//!   an optimizer error.
//!
//! Invariants & assumptions
//! ------------------------
//! - The selected bandwidth is `≥ lower_bound`.
//! - Nothing is cached; every call runs a fresh search.
use std::str::FromStr;

use crate::{
    density::{
        cross_validation::UcvObjective,
        errors::{KdeError, KdeResult},
        estimator::DensityEstimator,
        validation::{validate_lower_bound, validate_sample},
    },
    optimization::scalar_optimizer::{
        FnEvalMap, SearchMethod, SearchOptions, Tolerances, minimize,
    },
};
use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Default lower bound on the bandwidth.
pub const DEFAULT_LOWER_BOUND: f64 = 1e-8;

/// Ratio between the IQR and the standard deviation of a normal
/// distribution, rounded as in Silverman's rule.
pub const IQR_TO_SD: f64 = 1.34;

/// Bandwidth search configuration.
///
/// - `lower_bound`: smallest admissible bandwidth, finite and `> 0`.
/// - `search`: solver choice, tolerances and failure policy.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthOptions {
    pub lower_bound: f64,
    pub search: SearchOptions,
}

impl BandwidthOptions {
    /// Validated options with the default Brent search.
    ///
    /// Errors
    /// ------
    /// - `KdeError::InvalidLowerBound` for a non-positive or non-finite
    ///   bound.
    /// - `KdeError::Optimization` wrapping `InvalidTolerance` /
    ///   `InvalidMaxIter` (kind `InvalidInput`).
    pub fn new(tolerance: f64, max_iterations: usize, lower_bound: f64) -> KdeResult<Self> {
        validate_lower_bound(lower_bound)?;
        let tols = Tolerances::new(tolerance, max_iterations)?;
        Ok(Self { lower_bound, search: SearchOptions { tols, ..SearchOptions::default() } })
    }

    /// Options from a fully specified search configuration.
    pub fn with_search(lower_bound: f64, search: SearchOptions) -> KdeResult<Self> {
        validate_lower_bound(lower_bound)?;
        Ok(Self { lower_bound, search })
    }

    pub fn method(mut self, method: SearchMethod) -> Self {
        self.search.method = method;
        self
    }

    /// Parse and set the search method (`"brent"`, `"lbfgs"`,
    /// `"morethuente"`, `"hagerzhang"`).
    pub fn method_str(self, method: &str) -> KdeResult<Self> {
        Ok(self.method(SearchMethod::from_str(method)?))
    }

    pub fn best_effort(mut self, best_effort: bool) -> Self {
        self.search.best_effort = best_effort;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.search.verbose = verbose;
        self
    }
}

impl Default for BandwidthOptions {
    fn default() -> Self {
        Self { lower_bound: DEFAULT_LOWER_BOUND, search: SearchOptions::default() }
    }
}

/// Result of a bandwidth search.
#[derive(Debug, Clone, PartialEq)]
pub struct BandwidthOutcome {
    pub bandwidth: f64,
    pub ucv: f64,
    pub rule_of_thumb: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

/// Silverman's rule-of-thumb bandwidth for `sample`.
///
/// Errors
/// ------
/// - Sample validation errors (fewer than two or non-finite observations).
pub fn rule_of_thumb(sample: &[f64]) -> KdeResult<f64> {
    validate_sample(sample)?;
    Ok(silverman(sample))
}

pub(crate) fn silverman(sample: &[f64]) -> f64 {
    let n = sample.len() as f64;
    let sd = sample.iter().std_dev();
    let iqr = Data::new(sample.to_vec()).interquartile_range();
    let spread = [sd, iqr / IQR_TO_SD]
        .into_iter()
        .filter(|s| s.is_finite() && *s > 0.0)
        .fold(f64::INFINITY, f64::min);
    let spread = if spread.is_finite() { spread } else { 1.0 };
    0.9 * spread * n.powf(-0.2)
}

/// Minimize UCV over `[opts.lower_bound, ∞)` for `estimator`.
pub fn select(estimator: &DensityEstimator, opts: &BandwidthOptions) -> KdeResult<BandwidthOutcome> {
    validate_lower_bound(opts.lower_bound)?;
    let h0 = silverman(estimator.sample());
    let start = h0.max(2.0 * opts.lower_bound);
    log::debug!(
        "bandwidth search: n = {}, rule of thumb = {h0:.6e}, start = {start:.6e}, method = {:?}",
        estimator.n_obs(),
        opts.search.method
    );

    let objective = UcvObjective::new(estimator);
    let outcome = match minimize(&objective, opts.lower_bound, start, &opts.search) {
        Ok(outcome) => outcome,
        Err(err) => {
            return Err(objective.take_failure().unwrap_or(KdeError::Optimization(err)));
        }
    };

    log::debug!(
        "selected bandwidth {:.6e} (ucv {:.8e}, {} iterations, {})",
        outcome.x_hat,
        outcome.value,
        outcome.iterations,
        outcome.status
    );
    Ok(BandwidthOutcome {
        bandwidth: outcome.x_hat,
        ucv: outcome.value,
        rule_of_thumb: h0,
        converged: outcome.converged,
        status: outcome.status,
        iterations: outcome.iterations,
        fn_evals: outcome.fn_evals,
    })
}
