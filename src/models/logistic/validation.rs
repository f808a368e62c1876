//! Precondition checks for logistic-regression inputs.
//!
//! All checks run before any optimizer iteration and return the first
//! violation found, scanning in row-major order.
use crate::models::errors::{ModelError, ModelResult};
use ndarray::{ArrayView1, ArrayView2};

/// Design matrix must be non-empty with finite entries.
///
/// # Errors
/// [`ModelError::EmptyDesign`] or [`ModelError::NonFiniteFeature`].
pub fn validate_design(x: ArrayView2<'_, f64>) -> ModelResult<()> {
    let (n_samples, n_features) = x.dim();
    if n_samples == 0 || n_features == 0 {
        return Err(ModelError::EmptyDesign { n_samples, n_features });
    }
    if let Some(((row, col), &value)) = x.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(ModelError::NonFiniteFeature { row, col, value });
    }
    Ok(())
}

/// Targets must match the sample count of `x` and be exactly 0.0 or 1.0.
///
/// # Errors
/// [`ModelError::SampleCountMismatch`] or [`ModelError::NonBinaryTarget`].
pub fn validate_targets(x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> ModelResult<()> {
    if y.len() != x.nrows() {
        return Err(ModelError::SampleCountMismatch { expected: x.nrows(), actual: y.len() });
    }
    if let Some((index, &value)) = y.indexed_iter().find(|(_, v)| **v != 0.0 && **v != 1.0) {
        return Err(ModelError::NonBinaryTarget { index, value });
    }
    Ok(())
}

/// Inference input must have the feature count seen during fit and finite
/// entries. Zero rows are allowed.
///
/// # Errors
/// [`ModelError::FeatureCountMismatch`] or [`ModelError::NonFiniteFeature`].
pub fn validate_inference_design(x: ArrayView2<'_, f64>, n_features: usize) -> ModelResult<()> {
    if x.ncols() != n_features {
        return Err(ModelError::FeatureCountMismatch { expected: n_features, actual: x.ncols() });
    }
    if x.nrows() == 0 {
        return Ok(());
    }
    validate_design(x)
}
