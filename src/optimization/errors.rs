use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- SearchOptions ----
    /// Convergence tolerance needs to be positive and finite.
    InvalidTolerance {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },
    /// Invalid search method name.
    InvalidSearchMethod {
        name: String,
        reason: &'static str,
    },
    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Domain ----
    /// Lower bound of the search domain must be finite and > 0.
    InvalidLowerBound {
        value: f64,
        reason: &'static str,
    },
    /// Starting point must be finite and strictly above the lower bound.
    InvalidStart {
        value: f64,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Objective returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },
    /// Objective reported an error of its own at `at`.
    ObjectiveFailed {
        at: f64,
        text: String,
    },

    // ---- Optimizer outcome ----
    /// Estimated minimizer must be finite.
    InvalidEstimate {
        value: f64,
        reason: &'static str,
    },
    /// Minimizer is missing from the solver state.
    MissingEstimate,
    /// Solver stopped without reporting convergence.
    NotConverged {
        iterations: usize,
        status: String,
    },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl OptError {
    /// `true` when the error stems from invalid options or an invalid
    /// search domain rather than from running the solver.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            OptError::InvalidTolerance { .. }
                | OptError::InvalidMaxIter { .. }
                | OptError::InvalidLineSearch { .. }
                | OptError::InvalidSearchMethod { .. }
                | OptError::InvalidLBFGSMem { .. }
                | OptError::InvalidLowerBound { .. }
                | OptError::InvalidStart { .. }
        )
    }
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- SearchOptions ----
            OptError::InvalidTolerance { tol, reason } => {
                write!(f, "Invalid convergence tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidSearchMethod { name, reason } => {
                write!(f, "Invalid search method '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Domain ----
            OptError::InvalidLowerBound { value, reason } => {
                write!(f, "Invalid lower bound {value}: {reason}")
            }
            OptError::InvalidStart { value, reason } => {
                write!(f, "Invalid starting point {value}: {reason}")
            }

            // ---- Objective ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::ObjectiveFailed { at, text } => {
                write!(f, "Objective evaluation failed at {at}: {text}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidEstimate { value, reason } => {
                write!(f, "Invalid estimated minimizer {value}: {reason}")
            }
            OptError::MissingEstimate => {
                write!(f, "Missing estimated minimizer")
            }
            OptError::NotConverged { iterations, status } => {
                write!(f, "Optimizer did not converge after {iterations} iterations: {status}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Objective errors travel through argmin unchanged; recover them first.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}
