//! Errors for estimators (input preconditions and fitted-state guards).
//!
//! This module defines [`ModelError`], raised at the model boundary before
//! any optimizer iteration begins, and the [`ModelResult`] alias.
//!
//! ## Conventions
//! - **Indices are 0-based**; `row`/`col` refer to the caller's design
//!   matrix, not the bias-augmented copy.
//! - Non-convergence is **not** an error: `fit` reports it as a
//!   `ConvergenceWarning` and still stores the parameters it reached.
//! - Numerical degeneracy (probabilities of exactly 0 or 1) is handled by
//!   clamping inside the cost and never surfaces here.

/// Result alias for model operations that may produce [`ModelError`].
pub type ModelResult<T> = Result<T, ModelError>;

/// Unified error type for estimators.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    // ---- Preconditions on X ----
    /// Design matrix has no samples or no features.
    EmptyDesign { n_samples: usize, n_features: usize },

    /// Row-major input whose rows differ in length.
    RaggedDesign { row: usize, expected: usize, actual: usize },

    /// A feature value is NaN/±inf.
    NonFiniteFeature { row: usize, col: usize, value: f64 },

    // ---- Preconditions on y ----
    /// X and y disagree on the number of samples.
    SampleCountMismatch { expected: usize, actual: usize },

    /// A target value is neither 0 nor 1.
    NonBinaryTarget { index: usize, value: f64 },

    // ---- Fitted-state guards ----
    /// Inference input has a different feature count than the training data.
    FeatureCountMismatch { expected: usize, actual: usize },

    /// Model hasn't been fitted yet.
    ModelNotFitted,

    // ---- Optimizer output ----
    /// The optimizer returned a `θ̂` whose length is not `n_features + 1`.
    InvalidThetaHat { expected: usize, actual: usize },
}

impl ModelError {
    /// `true` for errors caused by the shape or content of caller input.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, ModelError::ModelNotFitted | ModelError::InvalidThetaHat { .. })
    }
}

impl std::error::Error for ModelError {}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Preconditions on X ----
            ModelError::EmptyDesign { n_samples, n_features } => {
                write!(
                    f,
                    "Design matrix must have at least one sample and one feature; got {n_samples} x {n_features}."
                )
            }
            ModelError::RaggedDesign { row, expected, actual } => {
                write!(
                    f,
                    "Design matrix is not rectangular: row {row} has {actual} features, expected {expected}."
                )
            }
            ModelError::NonFiniteFeature { row, col, value } => {
                write!(f, "Feature at row {row}, column {col} is non-finite: {value}")
            }
            // ---- Preconditions on y ----
            ModelError::SampleCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Target length must match the number of samples: expected {expected}, got {actual}."
                )
            }
            ModelError::NonBinaryTarget { index, value } => {
                write!(f, "Target at index {index} must be 0 or 1; got: {value}")
            }
            // ---- Fitted-state guards ----
            ModelError::FeatureCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Input must have the feature count seen during fit: expected {expected}, got {actual}."
                )
            }
            ModelError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet; call fit before inference.")
            }
            // ---- Optimizer output ----
            ModelError::InvalidThetaHat { expected, actual } => {
                write!(
                    f,
                    "Optimizer returned {actual} parameters; the model needs {expected} (bias + features)."
                )
            }
        }
    }
}
