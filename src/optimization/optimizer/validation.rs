//! Validation helpers for optimizer configuration and iterates.
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Step-size checks**: [`verify_learning_rate`], [`verify_decay`].
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Iterate checks**: [`is_finite_step`] decides whether a cost/gradient
//!   pair may be used to take another step.
//!
//! Configuration helpers return domain-specific [`OptError`] variants.
//! Iterate checks return `bool`: numerical trouble inside a run is a
//! termination condition, never an error.
use crate::optimization::{
    errors::{OptError, OptResult},
    optimizer::types::{Cost, Grad},
};

/// Validate the optional gradient‐norm tolerance.
///
/// - Accepts `None` (no stopping rule on gradient).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost‐change tolerance (for convergence).
///
/// - Accepts `None` (no stopping rule on cost change).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a base learning rate: finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidLearningRate`] otherwise.
pub fn verify_learning_rate(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidLearningRate {
            value,
            reason: "Learning rate must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(OptError::InvalidLearningRate {
            value,
            reason: "Learning rate must be positive.",
        });
    }
    Ok(())
}

/// Validate a step decay coefficient: finite and non-negative.
///
/// # Errors
/// Returns [`OptError::InvalidDecay`] otherwise.
pub fn verify_decay(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::InvalidDecay { value, reason: "Decay must be finite." });
    }
    if value < 0.0 {
        return Err(OptError::InvalidDecay { value, reason: "Decay must be non-negative." });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Checks:
/// - `grad.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// `true` when a cost/gradient pair is usable for another descent step.
pub fn is_finite_step(cost: Cost, grad: &Grad, dim: usize) -> bool {
    cost.is_finite() && validate_grad(grad, dim).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Tolerance verifiers accept `None` and positive finite values and
    // reject zero, negatives, NaN and infinity.
    fn tolerance_verifiers_reject_non_positive_and_non_finite() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_grad(Some(f64::NAN)), Err(OptError::InvalidTolGrad { .. })));

        assert!(verify_tol_cost(None).is_ok());
        assert!(matches!(verify_tol_cost(Some(-1.0)), Err(OptError::InvalidTolCost { .. })));
        assert!(matches!(
            verify_tol_cost(Some(f64::INFINITY)),
            Err(OptError::InvalidTolCost { .. })
        ));
    }

    #[test]
    fn step_size_verifiers() {
        assert!(verify_learning_rate(0.5).is_ok());
        assert!(matches!(verify_learning_rate(0.0), Err(OptError::InvalidLearningRate { .. })));
        assert!(verify_decay(0.0).is_ok());
        assert!(matches!(verify_decay(-0.1), Err(OptError::InvalidDecay { .. })));
    }

    #[test]
    // Purpose
    // -------
    // `validate_grad` reports the first non-finite entry and dimension
    // mismatches.
    //
    // Given
    // -----
    // - A gradient with NaN at index 1, and a gradient of the wrong length.
    //
    // Expect
    // ------
    // - `InvalidGradient { index: 1, .. }` and `GradientDimMismatch`.
    fn validate_grad_reports_first_bad_entry() {
        let g = array![0.0, f64::NAN, f64::INFINITY];
        match validate_grad(&g, 3) {
            Err(OptError::InvalidGradient { index, .. }) => assert_eq!(index, 1),
            other => panic!("Expected InvalidGradient, got {other:?}"),
        }
        assert_eq!(
            validate_grad(&array![1.0], 2),
            Err(OptError::GradientDimMismatch { expected: 2, found: 1 })
        );
        assert!(is_finite_step(1.0, &array![1.0, 2.0], 2));
        assert!(!is_finite_step(f64::NAN, &array![1.0, 2.0], 2));
    }
}
