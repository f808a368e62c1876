//! models — estimators fitted through the optimization layer.
//!
//! Purpose
//! -------
//! Host user-facing statistical models. Each model supplies its cost
//! surface as a [`CostFunction`](crate::optimization::optimizer::CostFunction),
//! delegates fitting to an [`Optimizer`](crate::optimization::optimizer::Optimizer),
//! and guards inference behind an explicit fitted state.
//!
//! Key behaviors
//! -------------
//! - [`logistic`]: binary logistic regression.
//! - [`errors`]: [`ModelError`] / [`ModelResult`] for precondition and
//!   not-fitted failures.
//!
//! Invariants & assumptions
//! ------------------------
//! - Precondition errors are raised before any optimizer iteration.
//! - Optimizer non-convergence is a warning, never a `ModelError`.

pub mod errors;
pub mod logistic;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{ModelError, ModelResult};
pub use self::logistic::{
    ConvergenceWarning, FittedParams, LogLoss, LogisticPrediction, LogisticRegression, Prediction,
    design_from_rows,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use logit_fit::models::prelude::*;
//
// to import the main model surface in a single line.

pub mod prelude {
    pub use super::{
        ConvergenceWarning, LogisticRegression, ModelError, ModelResult, Prediction,
        design_from_rows,
    };
}
