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

    // ---- Tolerances ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    // ---- Strategy options ----
    /// Learning rate needs to be positive and finite.
    InvalidLearningRate {
        value: f64,
        reason: &'static str,
    },
    /// Step decay needs to be non-negative and finite.
    InvalidDecay {
        value: f64,
        reason: &'static str,
    },
    /// Mini-batch size needs to be at least 1.
    InvalidBatchSize {
        size: usize,
        reason: &'static str,
    },
    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },
    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
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
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
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

            // ---- Tolerances ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }

            // ---- Strategy options ----
            OptError::InvalidLearningRate { value, reason } => {
                write!(f, "Invalid learning rate {value}: {reason}")
            }
            OptError::InvalidDecay { value, reason } => {
                write!(f, "Invalid step decay {value}: {reason}")
            }
            OptError::InvalidBatchSize { size, reason } => {
                write!(f, "Invalid mini-batch size {size}: {reason}")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
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
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
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
        match original_err.downcast::<ArgminError>() {
            Ok(opt_err) => match opt_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                _ => OptError::UnknownError,
            },
            Err(err) => match err.downcast::<OptError>() {
                Ok(opt_err) => opt_err,
                Err(err) => OptError::BackendError { text: err.to_string() },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check that argmin's own error kinds are mapped onto the matching
    // `OptError` wrappers.
    //
    // Given
    // -----
    // - An `ArgminError::InvalidParameter` boxed into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - Conversion yields `OptError::InvalidParameter` with the same text.
    fn argmin_invalid_parameter_maps_to_wrapper() {
        // Arrange
        let err: Error = ArgminError::InvalidParameter { text: "tol".to_string() }.into();

        // Act
        let mapped = OptError::from(err);

        // Assert
        assert_eq!(mapped, OptError::InvalidParameter { text: "tol".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // An `OptError` that travelled through argmin as a boxed error comes back
    // out unchanged.
    //
    // Given
    // -----
    // - `OptError::NonFiniteCost` converted into `argmin::core::Error`.
    //
    // Expect
    // ------
    // - `OptError::from` recovers the original variant.
    fn opt_error_round_trips_through_argmin_error() {
        // Arrange
        let original = OptError::NonFiniteCost { value: f64::INFINITY };
        let err: Error = original.clone().into();

        // Act
        let mapped = OptError::from(err);

        // Assert
        assert_eq!(mapped, original);
    }

    #[test]
    fn display_mentions_offending_value() {
        let err = OptError::InvalidLearningRate { value: -0.5, reason: "must be positive." };
        assert_eq!(err.to_string(), "Invalid learning rate -0.5: must be positive.");
    }
}
