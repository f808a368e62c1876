//! logistic::cost — prediction and maximum-likelihood cost for logistic
//! regression.
//!
//! Purpose
//! -------
//! Supply the two capability objects the optimizer layer works with:
//! [`LogisticPrediction`] maps `(X_aug, θ)` to probabilities, and [`LogLoss`]
//! maps `(X_aug, θ, y)` to the mean negative log-likelihood and its gradient.
//!
//! Key behaviors
//! -------------
//! - Probabilities are `σ(X_aug · θ)` computed with the branch-stable
//!   logistic transform.
//! - Cost `c(θ) = −(1/m) Σᵢ [ yᵢ ln pᵢ + (1 − yᵢ) ln(1 − pᵢ) ]` with every
//!   `pᵢ` clamped into `[PROB_EPS, 1 − PROB_EPS]` before the logarithm.
//! - Gradient `∇c(θ) = (1/m) X_augᵀ (p − y)` using the unclamped `p`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs have been validated by the model layer (rectangular, finite,
//!   binary targets, `θ.len() == X_aug.ncols()`).
//! - Neither function mutates its inputs.
//! - For finite input the cost is finite and at most `−ln(PROB_EPS) ≈ 34.54`;
//!   a degenerate fit with `p ∈ {0, 1}` therefore never produces `NaN`/`inf`.
//!
//! Conventions
//! -----------
//! - `X_aug` carries the bias column at index 0, so `θ[0]` is the intercept.
use crate::optimization::{
    numerical_stability::{clamp_probability, logistic_inplace},
    optimizer::{
        traits::{CostFunction, PredictionFunction},
        types::{Cost, Grad},
    },
};
use ndarray::{Array1, ArrayView1, ArrayView2, Zip};

/// `σ(X_aug · θ)` for every sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogisticPrediction;

impl LogisticPrediction {
    /// Raw linear score `X_aug · θ`, before the logistic transform.
    pub fn scores(&self, x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>) -> Array1<f64> {
        x.dot(&theta)
    }
}

impl PredictionFunction for LogisticPrediction {
    fn predict(&self, x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>) -> Array1<f64> {
        let mut p = self.scores(x, theta);
        logistic_inplace(&mut p);
        p
    }
}

/// Mean negative log-likelihood of a Bernoulli model whose success
/// probabilities come from `prediction`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogLoss<P = LogisticPrediction> {
    pub prediction: P,
}

impl<P: PredictionFunction> LogLoss<P> {
    pub fn new(prediction: P) -> Self {
        Self { prediction }
    }

    /// Cost only, for callers that do not need the gradient.
    pub fn value(
        &self, x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>,
    ) -> Cost {
        let p = self.prediction.predict(x, theta);
        mean_log_loss(p.view(), y)
    }
}

impl<P: PredictionFunction> CostFunction for LogLoss<P> {
    fn evaluate(
        &self, x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>,
    ) -> (Cost, Grad) {
        let m = y.len() as f64;
        let p = self.prediction.predict(x, theta);
        let cost = mean_log_loss(p.view(), y);
        let resid = &p - &y;
        let grad = x.t().dot(&resid) / m;
        (cost, grad)
    }
}

/// `−(1/m) Σ [ y ln p + (1 − y) ln(1 − p) ]` on clamped probabilities.
fn mean_log_loss(p: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Cost {
    let m = y.len() as f64;
    let total = Zip::from(&p).and(&y).fold(0.0, |acc, &pi, &yi| {
        let pc = clamp_probability(pi);
        acc - (yi * pc.ln() + (1.0 - yi) * (1.0 - pc).ln())
    });
    total / m
}
