//! optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by every
//! optimizer strategy. By defining these in one place, the rest of the
//! optimization code stays agnostic to `ndarray` and Argmin generics.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors, gradients and scalar
//!   costs (`Theta`, `Grad`, `Cost`).
//! - Provide a standard map type for function-evaluation counters
//!   (`FnEvalMap`), shared by the hand-written descent loops and Argmin.
//! - Expose pre-wired L-BFGS solver aliases for the two supported line
//!   searches.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors are `ndarray` containers over `f64`.
//! - `Cost` is always the quantity being **minimized**.
//!
//! Testing notes
//! -------------
//! - Only aliases and constants live here; correctness is exercised by the
//!   strategy modules that instantiate them.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ` (bias first, then one weight per feature).
pub type Theta = Array1<f64>;

/// Gradient vector `∇c(θ)`, matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Scalar objective value being minimized.
pub type Cost = f64;

/// Function-evaluation counters keyed by name (e.g. `"cost_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// Iteration cap used when the configured tolerances carry none.
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
