//! logit_fit — parametric model fitting by iterative numerical optimization.
//!
//! Purpose
//! -------
//! Fit binary logistic-regression models through a small, strategy-agnostic
//! optimizer contract. A model describes its cost surface, an optimizer
//! drives the parameter vector toward a minimum, and every run reports one
//! of two terminal states: converged or out of iterations.
//!
//! Key behaviors
//! -------------
//! - `optimization`: the [`Optimizer`](optimization::optimizer::Optimizer)
//!   contract, batch / mini-batch gradient descent, Argmin-backed L-BFGS,
//!   validated tolerances and the numerically stable logistic transform.
//! - `models`: [`LogisticRegression`](models::LogisticRegression) with
//!   `fit`, `predict`, `classification_weight` and `get_feature_params`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Fitting is synchronous and single-threaded; each model exclusively owns
//!   its parameters and classification boundary.
//! - Input problems (shape, non-binary targets, non-finite features) and
//!   inference before `fit` are errors; non-convergence is a warning and
//!   numerical degeneracy is absorbed by probability clamping.
//!
//! Conventions
//! -----------
//! - Design matrices are `ndarray` arrays over `f64`, one row per sample.
//! - The library only emits records through the `log` facade; installing a
//!   logger is up to the application.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use logit_fit::models::prelude::*;
//! use ndarray::array;
//!
//! let x = array![[-2.0], [-1.0], [1.0], [2.0]];
//! let y = array![0.0, 0.0, 1.0, 1.0];
//!
//! let mut model: LogisticRegression = LogisticRegression::default();
//! let warning = model.fit(x.view(), y.view())?;
//! if let Some(w) = warning {
//!     eprintln!("{w}");
//! }
//! let p = model.predict_proba(array![[3.0]].view())?;
//! assert!(p[0] > 0.5);
//! # Ok::<(), logit_fit::models::ModelError>(())
//! ```

pub mod models;
pub mod optimization;
