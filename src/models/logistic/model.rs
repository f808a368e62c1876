//! logistic::model — the logistic-regression estimator.
//!
//! Purpose
//! -------
//! Own the fitted parameter vector of a binary logistic model, orchestrate
//! a single fit through any [`Optimizer`], and expose inference on top of
//! the fitted state.
//!
//! Key behaviors
//! -------------
//! - [`LogisticRegression::fit`] validates `X`/`y`, augments `X` with a bias
//!   column, starts from `θ = 0`, delegates to the optimizer with
//!   [`LogLoss`], and stores the returned `θ̂` split into intercept and
//!   coefficients.
//! - Non-convergence is surfaced as a [`ConvergenceWarning`] (and a
//!   `log::warn!` record), never as an error; the reached `θ̂` is kept.
//! - [`LogisticRegression::predict`] returns probabilities, or booleans
//!   `p ≥ b` once a classification boundary `b` is set.
//! - [`LogisticRegression::classification_weight`] returns the raw score
//!   `X_aug · θ̂`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Two states: unfitted (no parameters) and fitted. Every inference call
//!   on an unfitted model returns [`ModelError::ModelNotFitted`].
//! - Precondition errors are raised before the optimizer is invoked; a
//!   failed `fit` leaves any previously fitted state untouched.
//! - A successful `fit` overwrites all fitted state.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the state machine, precondition ordering, warning
//!   propagation, threshold semantics and the closed-form boundary of a
//!   one-feature toy problem. End-to-end properties live in `tests/`.
use crate::{
    models::{
        errors::{ModelError, ModelResult},
        logistic::{
            cost::{LogLoss, LogisticPrediction},
            data::augment_with_bias,
            validation::{validate_design, validate_inference_design, validate_targets},
        },
    },
    optimization::optimizer::{
        gradient_descent::BatchGradientDescent,
        traits::{OptimOutcome, Optimizer, PredictionFunction, Status},
        types::Theta,
    },
};
use ndarray::{Array1, ArrayView1, ArrayView2, s};

/// Fitted parameters, split out of `θ̂`.
///
/// - `theta`: full vector, bias first.
/// - `intercept`: `theta[0]`.
/// - `coefficients`: `theta[1..]`, one weight per feature.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedParams {
    pub theta: Theta,
    pub intercept: f64,
    pub coefficients: Array1<f64>,
}

impl FittedParams {
    /// Split a bias-first parameter vector of length `n_features + 1`.
    ///
    /// # Errors
    /// [`ModelError::InvalidThetaHat`] when the length does not match.
    pub fn from_theta(theta: Theta, n_features: usize) -> ModelResult<Self> {
        if theta.len() != n_features + 1 {
            return Err(ModelError::InvalidThetaHat {
                expected: n_features + 1,
                actual: theta.len(),
            });
        }
        let intercept = theta[0];
        let coefficients = theta.slice(s![1..]).to_owned();
        Ok(Self { theta, intercept, coefficients })
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }
}

/// Output of [`LogisticRegression::predict`].
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    /// No boundary set: `P(y = 1 | x)` per sample, in `[0, 1]`.
    Probabilities(Array1<f64>),
    /// Boundary `b` set: `true` iff the probability is `≥ b`.
    Classes(Array1<bool>),
}

impl Prediction {
    pub fn len(&self) -> usize {
        match self {
            Prediction::Probabilities(p) => p.len(),
            Prediction::Classes(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn probabilities(&self) -> Option<&Array1<f64>> {
        match self {
            Prediction::Probabilities(p) => Some(p),
            Prediction::Classes(_) => None,
        }
    }

    pub fn classes(&self) -> Option<&Array1<bool>> {
        match self {
            Prediction::Classes(c) => Some(c),
            Prediction::Probabilities(_) => None,
        }
    }
}

/// Non-fatal notice that the optimizer stopped without converging.
///
/// Carries the terminal status, the optimizer's termination message and its
/// `converge_hints()` text. The model is fitted with whatever `θ̂` was
/// reached.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceWarning {
    pub status: Status,
    pub message: String,
    pub hints: String,
}

impl std::fmt::Display for ConvergenceWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Optimizer {} ({}). {}", self.status, self.message, self.hints)
    }
}

/// Binary logistic regression fitted by an arbitrary [`Optimizer`].
///
/// The default strategy is [`BatchGradientDescent`] with its default options.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression<O = BatchGradientDescent> {
    /// Strategy used by `fit`.
    pub optimizer: O,
    classification_boundary: Option<f64>,
    cost: LogLoss<LogisticPrediction>,
    results: Option<OptimOutcome>,
    fitted_params: Option<FittedParams>,
}

impl Default for LogisticRegression<BatchGradientDescent> {
    fn default() -> Self {
        Self::new(BatchGradientDescent::default())
    }
}

impl<O: Optimizer> LogisticRegression<O> {
    /// Unfitted model with no classification boundary.
    pub fn new(optimizer: O) -> Self {
        Self {
            optimizer,
            classification_boundary: None,
            cost: LogLoss::new(LogisticPrediction),
            results: None,
            fitted_params: None,
        }
    }

    /// Builder form of [`set_classification_boundary`](Self::set_classification_boundary).
    pub fn with_classification_boundary(mut self, boundary: f64) -> Self {
        self.classification_boundary = Some(boundary);
        self
    }

    /// Set or clear the probability threshold used by [`predict`](Self::predict).
    pub fn set_classification_boundary(&mut self, boundary: Option<f64>) {
        self.classification_boundary = boundary;
    }

    pub fn classification_boundary(&self) -> Option<f64> {
        self.classification_boundary
    }

    /// Fit the model to `x` (`[n_samples, n_features]`) and binary `y`.
    ///
    /// ## Steps
    /// 1. Validate `x` (non-empty, finite) and `y` (length, values in {0, 1}).
    /// 2. Build `X_aug = [1 | x]` and `θ₀ = 0` of length `n_features + 1`.
    /// 3. Run the optimizer on [`LogLoss`], **moving** `θ₀` into it.
    /// 4. Check `θ̂` has length `n_features + 1`, then store the outcome and
    ///    the split parameters.
    ///
    /// ## Returns
    /// - `Ok(None)` when the optimizer converged.
    /// - `Ok(Some(warning))` when it ran out of iterations; the model is
    ///   still fitted.
    ///
    /// ## Errors
    /// - Any precondition [`ModelError`]; the optimizer is not invoked.
    /// - [`ModelError::InvalidThetaHat`] when the optimizer hands back a
    ///   parameter vector of the wrong length.
    ///
    /// On error the previous fit, if any, is left untouched.
    pub fn fit(
        &mut self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>,
    ) -> ModelResult<Option<ConvergenceWarning>> {
        validate_design(x)?;
        validate_targets(x, y)?;
        let x_aug = augment_with_bias(x);
        let theta0 = Theta::zeros(x_aug.ncols());

        let outcome = self.optimizer.optimize(x_aug.view(), y, theta0, &self.cost);
        log::debug!(
            "logistic fit: {} after {} iterations, cost = {:.6e}",
            outcome.status,
            outcome.iterations,
            outcome.cost
        );
        let params = FittedParams::from_theta(outcome.theta_hat.clone(), x.ncols())?;

        let warning = match outcome.status {
            Status::Converged => None,
            Status::OutOfIterations => {
                let warning = ConvergenceWarning {
                    status: outcome.status,
                    message: outcome.message.clone(),
                    hints: self.optimizer.converge_hints(),
                };
                log::warn!("{warning}");
                Some(warning)
            }
        };
        self.fitted_params = Some(params);
        self.results = Some(outcome);
        Ok(warning)
    }

    /// Probabilities, or classes when a boundary is set.
    ///
    /// ## Errors
    /// [`ModelError::ModelNotFitted`], or a precondition error on `x`.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> ModelResult<Prediction> {
        let proba = self.predict_proba(x)?;
        Ok(match self.classification_boundary {
            None => Prediction::Probabilities(proba),
            Some(b) => Prediction::Classes(proba.mapv(|p| p >= b)),
        })
    }

    /// `σ(X_aug · θ̂)` regardless of the classification boundary.
    pub fn predict_proba(&self, x: ArrayView2<'_, f64>) -> ModelResult<Array1<f64>> {
        let params = self.fitted()?;
        validate_inference_design(x, params.n_features())?;
        let x_aug = augment_with_bias(x);
        Ok(self.cost.prediction.predict(x_aug.view(), params.theta.view()))
    }

    /// Signed confidence margin `X_aug · θ̂`, without the logistic transform.
    pub fn classification_weight(&self, x: ArrayView2<'_, f64>) -> ModelResult<Array1<f64>> {
        let params = self.fitted()?;
        validate_inference_design(x, params.n_features())?;
        let x_aug = augment_with_bias(x);
        Ok(self.cost.prediction.scores(x_aug.view(), params.theta.view()))
    }

    /// Feature coefficients, excluding the intercept.
    pub fn get_feature_params(&self) -> ModelResult<&Array1<f64>> {
        Ok(&self.fitted()?.coefficients)
    }

    pub fn intercept(&self) -> ModelResult<f64> {
        Ok(self.fitted()?.intercept)
    }

    /// Full fitted `θ̂`, bias first.
    pub fn weights(&self) -> ModelResult<&Theta> {
        Ok(&self.fitted()?.theta)
    }

    /// Outcome of the last successful `fit`.
    pub fn results(&self) -> ModelResult<&OptimOutcome> {
        self.results.as_ref().ok_or(ModelError::ModelNotFitted)
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted_params.is_some()
    }

    fn fitted(&self) -> ModelResult<&FittedParams> {
        self.fitted_params.as_ref().ok_or(ModelError::ModelNotFitted)
    }
}
