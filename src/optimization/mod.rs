//! optimization — optimizer contract, strategies, numerical helpers, errors.
//!
//! Purpose
//! -------
//! Provide a self-contained optimization layer for model fitting. A model
//! describes its cost surface through [`optimizer::CostFunction`], picks a
//! strategy implementing [`optimizer::Optimizer`], and gets back an
//! [`optimizer::OptimOutcome`] carrying the final parameters, a two-valued
//! status and diagnostics.
//!
//! Key behaviors
//! -------------
//! - `optimizer`: the contract plus gradient-descent, mini-batch and L-BFGS
//!   strategies, tolerances and validated option structs.
//! - `numerical_stability`: the stable logistic transform and the
//!   probability clamp shared by log-loss style costs.
//! - `errors`: a single configuration/backend error enum
//!   ([`errors::OptError`]) with the [`errors::OptResult`] alias.
//!
//! Conventions
//! -----------
//! - Optimizers always *minimize*.
//! - Option constructors return `OptResult<Self>`; a run itself never
//!   returns an error.
//! - Logging goes through the `log` facade (`trace` per iteration, `debug`
//!   on termination, `warn` on backend trouble). With the `obs_slog`
//!   feature, verbose L-BFGS runs also attach Argmin's slog observer.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each strategy and use small analytic costs
//!   (quadratics, least squares, Rosenbrock) whose minima are known.

pub mod errors;
pub mod numerical_stability;
pub mod optimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use logit_fit::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
    pub use super::optimizer::prelude::*;
}
