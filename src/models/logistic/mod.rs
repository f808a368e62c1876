//! logistic — binary logistic regression on top of the optimizer contract.
//!
//! Purpose
//! -------
//! Provide a complete logistic-regression estimator: input validation,
//! design-matrix augmentation, the maximum-likelihood cost, and the
//! [`LogisticRegression`] type that ties them to any
//! [`Optimizer`](crate::optimization::optimizer::Optimizer).
//!
//! Key behaviors
//! -------------
//! - [`data`]: `augment_with_bias` and `design_from_rows`.
//! - [`validation`]: precondition checks run before fitting and inference.
//! - [`cost`]: [`LogisticPrediction`] and [`LogLoss`], the capability objects
//!   handed to the optimizer.
//! - [`model`]: [`LogisticRegression`], [`FittedParams`], [`Prediction`],
//!   [`ConvergenceWarning`].
//!
//! Conventions
//! -----------
//! - Parameters are bias first: `θ = (intercept, w₁, …, w_k)`.
//! - Targets are `f64` values in {0.0, 1.0}.

pub mod cost;
pub mod data;
pub mod model;
pub mod validation;

pub use self::cost::{LogLoss, LogisticPrediction};
pub use self::data::{augment_with_bias, design_from_rows};
pub use self::model::{ConvergenceWarning, FittedParams, LogisticRegression, Prediction};
