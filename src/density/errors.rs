//! density::errors — top-level error surface for density estimation.
//!
//! Purpose
//! -------
//! Collapse every failure the estimator can hit into [`KdeError`], and
//! classify it through [`KdeError::kind`] into the three outcomes callers
//! act on: bad input, integration failure, bandwidth search failure.
//!
//! Conventions
//! -----------
//! - Lower layers keep their own enums ([`QuadError`], [`OptError`]);
//!   `From` impls wrap them here, routing configuration problems to
//!   [`ErrorKind::InvalidInput`].
//! - Payloads carry the offending value so messages are self-explanatory.
use crate::{optimization::errors::OptError, quadrature::errors::QuadError};

/// Result alias for density estimation.
pub type KdeResult<T> = Result<T, KdeError>;

/// Coarse classification of [`KdeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid sample, bandwidth, evaluation point or option.
    InvalidInput,
    /// Numerical integration did not reach its tolerance.
    Integration,
    /// Bandwidth search did not converge or the solver failed.
    Optimization,
}

#[derive(Debug, Clone, PartialEq)]
pub enum KdeError {
    // ---- Sample ----
    /// At least two observations are required.
    InsufficientData {
        len: usize,
    },
    /// Every observation must be finite.
    NonFiniteSample {
        index: usize,
        value: f64,
    },

    // ---- Evaluation ----
    /// Bandwidth must be finite and strictly positive.
    InvalidBandwidth {
        value: f64,
    },
    /// Evaluation point must not be NaN.
    InvalidEvaluationPoint {
        value: f64,
    },
    /// Bandwidth lower bound must be finite and strictly positive.
    InvalidLowerBound {
        value: f64,
        reason: &'static str,
    },

    // ---- Lower layers ----
    /// Quadrature failure or quadrature misconfiguration.
    Integration(QuadError),
    /// Optimizer failure or optimizer misconfiguration.
    Optimization(OptError),
}

impl KdeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KdeError::InsufficientData { .. }
            | KdeError::NonFiniteSample { .. }
            | KdeError::InvalidBandwidth { .. }
            | KdeError::InvalidEvaluationPoint { .. }
            | KdeError::InvalidLowerBound { .. } => ErrorKind::InvalidInput,
            KdeError::Integration(err) if err.is_configuration() => ErrorKind::InvalidInput,
            KdeError::Integration(_) => ErrorKind::Integration,
            KdeError::Optimization(err) if err.is_configuration() => ErrorKind::InvalidInput,
            KdeError::Optimization(_) => ErrorKind::Optimization,
        }
    }
}

impl std::error::Error for KdeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KdeError::Integration(err) => Some(err),
            KdeError::Optimization(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for KdeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Sample ----
            KdeError::InsufficientData { len } => {
                write!(f, "Insufficient data: need at least 2 observations, got {len}")
            }
            KdeError::NonFiniteSample { index, value } => {
                write!(f, "Non-finite observation at index {index}: {value}")
            }

            // ---- Evaluation ----
            KdeError::InvalidBandwidth { value } => {
                write!(f, "Invalid bandwidth {value}: must be finite and > 0")
            }
            KdeError::InvalidEvaluationPoint { value } => {
                write!(f, "Invalid evaluation point {value}")
            }
            KdeError::InvalidLowerBound { value, reason } => {
                write!(f, "Invalid bandwidth lower bound {value}: {reason}")
            }

            // ---- Lower layers ----
            KdeError::Integration(err) => write!(f, "Integration error: {err}"),
            KdeError::Optimization(err) => write!(f, "Optimization error: {err}"),
        }
    }
}

impl From<QuadError> for KdeError {
    fn from(err: QuadError) -> Self {
        KdeError::Integration(err)
    }
}

impl From<OptError> for KdeError {
    fn from(err: OptError) -> Self {
        KdeError::Optimization(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `kind()` classification of own and wrapped errors.
    // - Message content and `source()` chaining.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Wrapped lower-layer errors are classified by their nature, not by
    // the layer they come from.
    //
    // Given
    // -----
    // - A quadrature budget failure, a quadrature option error, a solver
    //   non-convergence and an optimizer option error.
    //
    // Expect
    // ------
    // - Integration, InvalidInput, Optimization, InvalidInput.
    fn kind_classifies_wrapped_errors() {
        // Arrange
        let budget = KdeError::from(QuadError::SubdivisionLimit {
            limit: 1,
            estimate: 0.0,
            error: 1.0,
        });
        let quad_cfg = KdeError::from(QuadError::NoTolerancesProvided);
        let stalled =
            KdeError::from(OptError::NotConverged { iterations: 1, status: "capped".into() });
        let opt_cfg =
            KdeError::from(OptError::InvalidTolerance { tol: -1.0, reason: "negative" });

        // Act / Assert
        assert_eq!(budget.kind(), ErrorKind::Integration);
        assert_eq!(quad_cfg.kind(), ErrorKind::InvalidInput);
        assert_eq!(stalled.kind(), ErrorKind::Optimization);
        assert_eq!(opt_cfg.kind(), ErrorKind::InvalidInput);
        assert_eq!(KdeError::InsufficientData { len: 1 }.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    // Purpose
    // -------
    // Wrapped errors stay reachable through `source()` and appear in the
    // message.
    //
    // Given
    // -----
    // - `KdeError::Integration(SubdivisionLimit { limit: 7, .. })`.
    //
    // Expect
    // ------
    // - `source()` is `Some` and the message mentions the budget.
    fn wrapped_errors_chain_and_display() {
        // Arrange
        let err = KdeError::from(QuadError::SubdivisionLimit {
            limit: 7,
            estimate: 0.4,
            error: 0.1,
        });

        // Act
        let msg = err.to_string();

        // Assert
        assert!(std::error::Error::source(&err).is_some());
        assert!(msg.contains('7'), "Message should include the budget.\nGot: {msg}");
    }
}
