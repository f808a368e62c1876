//! optimizer::finite_diff — finite-difference gradient checks.
//!
//! Purpose
//! -------
//! Let callers who write their own [`CostFunction`] verify the analytic
//! gradient against a central-difference estimate before handing the cost
//! to an optimizer. A wrong gradient is the most common reason a descent
//! strategy stalls or diverges, and it is cheap to catch on a small sample.
//!
//! Key behaviors
//! -------------
//! - [`numerical_gradient`] differentiates the cost component of
//!   `CostFunction::evaluate` with `finitediff`'s central scheme.
//! - [`gradient_discrepancy`] reports the largest absolute difference between
//!   the analytic and the numerical gradient.
//!
//! Conventions
//! -----------
//! - Both gradients pass [`validate_grad`] before they are compared, so a
//!   non-finite or wrongly-sized gradient is reported as an [`OptError`]
//!   rather than as a huge discrepancy.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use crate::optimization::{
    errors::OptResult,
    optimizer::{
        traits::CostFunction,
        types::{Grad, Theta},
        validation::validate_grad,
    },
};
use finitediff::FiniteDiff;
use ndarray::{ArrayView1, ArrayView2};

/// Central-difference gradient of `cost(X, ·, y)` at `theta`.
///
/// # Errors
/// `OptError::InvalidGradient` when any entry of the estimate is non-finite.
pub fn numerical_gradient(
    cost: &dyn CostFunction, x: ArrayView2<'_, f64>, theta: &Theta, y: ArrayView1<'_, f64>,
) -> OptResult<Grad> {
    let f = |t: &Theta| cost.evaluate(x, t.view(), y).0;
    let grad = theta.central_diff(&f);
    validate_grad(&grad, theta.len())?;
    Ok(grad)
}

/// Largest absolute difference between the analytic gradient returned by
/// `cost` and its central-difference estimate at `theta`.
///
/// # Errors
/// - `OptError::GradientDimMismatch` when the analytic gradient has the wrong
///   length.
/// - `OptError::InvalidGradient` when either gradient has a non-finite entry.
pub fn gradient_discrepancy(
    cost: &dyn CostFunction, x: ArrayView2<'_, f64>, theta: &Theta, y: ArrayView1<'_, f64>,
) -> OptResult<f64> {
    let (_, analytic) = cost.evaluate(x, theta.view(), y);
    validate_grad(&analytic, theta.len())?;
    let numeric = numerical_gradient(cost, x, theta, y)?;
    Ok(analytic.iter().zip(numeric.iter()).fold(0.0_f64, |acc, (a, n)| acc.max((a - n).abs())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptError, optimizer::types::Cost};
    use ndarray::{Array1, Array2, array};

    /// `c(θ) = θ₀² + 3 θ₀ θ₁` with a correct or deliberately wrong gradient.
    struct Bilinear {
        wrong: bool,
    }

    impl CostFunction for Bilinear {
        fn evaluate(
            &self, _x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>, _y: ArrayView1<'_, f64>,
        ) -> (Cost, Grad) {
            let (a, b) = (theta[0], theta[1]);
            let cost = a * a + 3.0 * a * b;
            let grad = if self.wrong {
                array![2.0 * a, 3.0 * b]
            } else {
                array![2.0 * a + 3.0 * b, 3.0 * a]
            };
            (cost, grad)
        }
    }

    struct ShortGradient;

    impl CostFunction for ShortGradient {
        fn evaluate(
            &self, _x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>, _y: ArrayView1<'_, f64>,
        ) -> (Cost, Grad) {
            (theta.sum(), array![1.0])
        }
    }

    fn no_data() -> (Array2<f64>, Array1<f64>) {
        (Array2::zeros((1, 2)), Array1::zeros(1))
    }

    #[test]
    // Purpose
    // -------
    // A correct analytic gradient agrees with the central difference.
    //
    // Given
    // -----
    // - c(θ) = θ₀² + 3θ₀θ₁ at θ = (0.5, −1.25).
    //
    // Expect
    // ------
    // - Discrepancy below 1e-6.
    fn correct_gradient_has_small_discrepancy() {
        // Arrange
        let (x, y) = no_data();
        let theta = array![0.5, -1.25];

        // Act
        let gap = gradient_discrepancy(&Bilinear { wrong: false }, x.view(), &theta, y.view())
            .expect("finite gradients");

        // Assert
        assert!(gap < 1e-6, "discrepancy {gap}");
    }

    #[test]
    fn wrong_gradient_is_detected() {
        let (x, y) = no_data();
        let theta = array![0.5, -1.25];

        let gap = gradient_discrepancy(&Bilinear { wrong: true }, x.view(), &theta, y.view())
            .expect("finite gradients");

        // The wrong formula drops the cross terms.
        assert!(gap > 1.0, "discrepancy {gap}");
    }

    #[test]
    fn wrongly_sized_gradient_is_an_error() {
        let (x, y) = no_data();
        let err = gradient_discrepancy(&ShortGradient, x.view(), &array![1.0, 2.0], y.view())
            .expect_err("length mismatch must be reported");
        assert_eq!(err, OptError::GradientDimMismatch { expected: 2, found: 1 });
    }
}
