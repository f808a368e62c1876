//! optimizer — the `Optimizer` contract and its concrete strategies.
//!
//! Purpose
//! -------
//! Define how a parameter vector `θ` is driven toward a minimum of a cost
//! surface, independently of the model that supplies the surface. Models
//! implement [`CostFunction`]; strategies implement [`Optimizer`]; every run
//! ends in one of the two [`Status`] values.
//!
//! Key behaviors
//! -------------
//! - [`BatchGradientDescent`]: full-batch descent with a constant or
//!   inverse-decay step.
//! - [`MiniBatchGradientDescent`]: seeded mini-batch descent, deterministic
//!   for a fixed seed.
//! - [`Lbfgs`]: Argmin's L-BFGS with a More–Thuente or Hager–Zhang line
//!   search.
//! - [`finite_diff`]: central-difference gradient checks for user-written
//!   cost functions.
//!
//! Invariants & assumptions
//! ------------------------
//! - `optimize` is infallible and bounded: configuration errors are caught
//!   when options are constructed, numerical trouble during a run ends it
//!   with [`Status::OutOfIterations`].
//! - `θ₀` is moved into `optimize`; the returned [`OptimOutcome::theta_hat`]
//!   is authoritative.
//!
//! Downstream usage
//! ----------------
//! - `models::logistic::LogisticRegression<O: Optimizer>` is generic over
//!   the strategy and defaults to [`BatchGradientDescent`].
//! - Most callers import `optimization::prelude::*`.

pub mod finite_diff;
pub mod gradient_descent;
pub mod lbfgs;
pub mod stochastic;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::gradient_descent::{BatchGradientDescent, GradientDescentOptions, StepSchedule};
pub use self::lbfgs::{Lbfgs, LbfgsOptions};
pub use self::stochastic::{MiniBatchGradientDescent, MiniBatchOptions};
pub use self::traits::{
    CostFunction, LineSearcher, OptimOutcome, Optimizer, PredictionFunction, Status, Tolerances,
};
pub use self::types::{Cost, DEFAULT_MAX_ITER, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::finite_diff::gradient_discrepancy;
    pub use super::{
        BatchGradientDescent, CostFunction, GradientDescentOptions, Lbfgs, LbfgsOptions,
        LineSearcher, MiniBatchGradientDescent, MiniBatchOptions, OptimOutcome, Optimizer,
        PredictionFunction, Status, StepSchedule, Theta, Tolerances,
    };
}
