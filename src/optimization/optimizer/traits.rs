//! Public contract of the optimization layer.
//!
//! - [`CostFunction`]: `(X, θ, y) → (cost, ∇cost)`, implemented by models.
//! - [`PredictionFunction`]: `(X, θ) → ŷ`, reused for inference.
//! - [`Optimizer`]: strategy that drives `θ` toward a minimum of a
//!   [`CostFunction`] and reports a two-valued [`Status`].
//! - [`Tolerances`] and [`LineSearcher`]: configuration shared by strategies.
//! - [`OptimOutcome`]: normalized result of one `optimize` call.
//!
//! Convention: optimizers always *minimize*. Design matrices handed to an
//! optimizer are already in their final form (e.g. bias-augmented); the
//! optimizer never changes features, only `θ`.
use crate::optimization::{
    errors::{OptError, OptResult},
    optimizer::{
        types::{Cost, FnEvalMap, Grad, Theta},
        validation::{verify_tol_cost, verify_tol_grad},
    },
};
use ndarray::{Array1, ArrayView1, ArrayView2};
use std::str::FromStr;

/// Cost surface over a parameter vector.
///
/// `evaluate(X, θ, y)` returns the scalar cost and its gradient with
/// respect to `θ` (same length as `θ`). Implementations must not mutate
/// any input and should keep every output finite for finite input; an
/// optimizer treats non-finite output as divergence.
pub trait CostFunction {
    fn evaluate(&self, x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>)
    -> (Cost, Grad);
}

/// Maps a design matrix and parameters to one predicted value per sample.
pub trait PredictionFunction {
    fn predict(&self, x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>) -> Array1<f64>;
}

/// Terminal state of an `optimize` call.
///
/// Closed on purpose: a run either met its stopping criterion or used up
/// its iteration budget (divergence included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Converged,
    OutOfIterations,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Converged => write!(f, "converged"),
            Status::OutOfIterations => write!(f, "out of iterations"),
        }
    }
}

/// Iterative minimization strategy.
///
/// Required:
/// - `optimize(X, y, θ₀, cost) -> OptimOutcome`: move `θ₀` toward a minimum
///   of `cost(X, ·, y)`. Always terminates and always returns a status;
///   numerical trouble ends the run with [`Status::OutOfIterations`] and the
///   last finite `θ` reached.
/// - `converge_hints() -> String`: advice on how to reach convergence with
///   this strategy. Diagnostic only.
pub trait Optimizer {
    fn optimize(
        &self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, theta0: Theta,
        cost: &dyn CostFunction,
    ) -> OptimOutcome;

    fn converge_hints(&self) -> String;
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizers.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]). Strategies fall back to
/// [`DEFAULT_MAX_ITER`](crate::optimization::optimizer::types::DEFAULT_MAX_ITER)
/// when `max_iter` is `None`, so every run is bounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(10_000) }
    }
}

/// Result of one `optimize` call.
///
/// - `theta_hat`: final parameter vector (authoritative; replaces `θ₀`).
/// - `status`: [`Status::Converged`] or [`Status::OutOfIterations`].
/// - `cost`: cost at `theta_hat`.
/// - `iterations`: number of parameter updates performed.
/// - `grad_norm`: L2 norm of the gradient at `theta_hat`, if known.
/// - `cost_history`: cost at the start of every iteration, for strategies
///   that record it; empty otherwise.
/// - `fn_evals`: function-evaluation counters (e.g. `cost_count`).
/// - `message`: human-readable termination reason.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub status: Status,
    pub cost: Cost,
    pub iterations: usize,
    pub grad_norm: Option<f64>,
    pub cost_history: Vec<Cost>,
    pub fn_evals: FnEvalMap,
    pub message: String,
}

impl OptimOutcome {
    /// `true` iff the run ended in [`Status::Converged`].
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}

/// L2 norm of a gradient vector.
pub fn l2_norm(grad: &Grad) -> f64 {
    grad.dot(grad).sqrt()
}
