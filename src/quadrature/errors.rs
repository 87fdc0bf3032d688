//! quadrature::errors — error surface for adaptive numerical integration.
//!
//! Purpose
//! -------
//! Describe every way a quadrature request can fail: bad configuration,
//! malformed intervals, integrands that produce non-finite values, and
//! budgets that run out before the requested accuracy is reached.
//!
//! Conventions
//! -----------
//! - Configuration problems are detected eagerly when options are built;
//!   [`QuadError::is_configuration`] lets upper layers classify them as
//!   caller input errors.
//! - Convergence failures carry the best estimate and its error bound so
//!   that callers can decide whether to relax tolerances.

/// Result alias for quadrature routines.
pub type QuadResult<T> = Result<T, QuadError>;

#[derive(Debug, Clone, PartialEq)]
pub enum QuadError {
    // ---- QuadOptions ----
    /// Absolute tolerance must be finite and non-negative.
    InvalidAbsTol {
        tol: f64,
        reason: &'static str,
    },
    /// Relative tolerance must be finite and non-negative.
    InvalidRelTol {
        tol: f64,
        reason: &'static str,
    },
    /// Both tolerances are zero, so no accuracy target exists.
    NoTolerancesProvided,
    /// Subdivision budget must be positive.
    InvalidMaxSubdivisions {
        max: usize,
        reason: &'static str,
    },
    /// Tail scale must be finite and strictly positive.
    InvalidTailScale {
        scale: f64,
        reason: &'static str,
    },

    // ---- Interval ----
    /// Bounds are NaN, reversed, or point the wrong way to infinity.
    InvalidInterval {
        lower: f64,
        upper: f64,
    },

    // ---- Integrand ----
    /// The integrand returned NaN or ±∞.
    NonFiniteIntegrand {
        x: f64,
        value: f64,
    },

    // ---- Convergence ----
    /// Bisection budget exhausted before the tolerance was met.
    SubdivisionLimit {
        limit: usize,
        estimate: f64,
        error: f64,
    },
    /// A panel became too narrow to split in floating point.
    RoundoffDetected {
        lower: f64,
        upper: f64,
        estimate: f64,
        error: f64,
    },
}

impl QuadError {
    /// `true` for errors caused by invalid options or intervals rather than
    /// by the numerical behavior of the integrand.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            QuadError::InvalidAbsTol { .. }
                | QuadError::InvalidRelTol { .. }
                | QuadError::NoTolerancesProvided
                | QuadError::InvalidMaxSubdivisions { .. }
                | QuadError::InvalidTailScale { .. }
                | QuadError::InvalidInterval { .. }
        )
    }
}

impl std::error::Error for QuadError {}

impl std::fmt::Display for QuadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- QuadOptions ----
            QuadError::InvalidAbsTol { tol, reason } => {
                write!(f, "Invalid absolute tolerance {tol}: {reason}")
            }
            QuadError::InvalidRelTol { tol, reason } => {
                write!(f, "Invalid relative tolerance {tol}: {reason}")
            }
            QuadError::NoTolerancesProvided => {
                write!(f, "At least one of the absolute or relative tolerances must be positive")
            }
            QuadError::InvalidMaxSubdivisions { max, reason } => {
                write!(f, "Invalid subdivision budget {max}: {reason}")
            }
            QuadError::InvalidTailScale { scale, reason } => {
                write!(f, "Invalid tail scale {scale}: {reason}")
            }

            // ---- Interval ----
            QuadError::InvalidInterval { lower, upper } => {
                write!(f, "Invalid integration interval [{lower}, {upper}]")
            }

            // ---- Integrand ----
            QuadError::NonFiniteIntegrand { x, value } => {
                write!(f, "Integrand is not finite at x = {x}: {value}")
            }

            // ---- Convergence ----
            QuadError::SubdivisionLimit { limit, estimate, error } => write!(
                f,
                "Quadrature did not converge within {limit} subdivisions \
                 (estimate {estimate}, error bound {error})"
            ),
            QuadError::RoundoffDetected { lower, upper, estimate, error } => write!(
                f,
                "Quadrature panel [{lower}, {upper}] cannot be subdivided further \
                 (estimate {estimate}, error bound {error})"
            ),
        }
    }
}
