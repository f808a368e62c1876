//! numerical_stability — numerically robust transforms shared by models.
//!
//! Purpose
//! -------
//! Collect the small scalar transforms and tolerances that every
//! probabilistic model in this crate relies on, so that cost functions and
//! inference paths agree on the same guarded arithmetic.
//!
//! Key behaviors
//! -------------
//! - Provide a stable logistic transform (`safe_logistic`) and an in-place
//!   array variant (`logistic_inplace`).
//! - Centralize the probability clamping margin (`PROB_EPS`) and the
//!   clamp itself (`clamp_probability`) used before taking logarithms.
//!
//! Invariants & assumptions
//! ------------------------
//! - All transforms assume finite `f64` inputs; shape and finiteness
//!   validation happens in the model layer.
//! - `safe_logistic` never returns `NaN` for finite input; it may return
//!   exactly `0.0` or `1.0` in the far tails, which is why log-based costs
//!   must clamp with `clamp_probability`.
//!
//! Conventions
//! -----------
//! - Pure functions, no logging, no I/O, no global state; suitable for
//!   tight inner loops.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with naïve formulas
//!   on safe grids, tail saturation, symmetry, and the clamp bounds.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{PROB_EPS, clamp_probability, logistic_inplace, safe_logistic};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{PROB_EPS, clamp_probability, safe_logistic};
}
