//! optimizer::gradient_descent — full-batch gradient descent.
//!
//! Purpose
//! -------
//! Provide the reference [`Optimizer`] strategy: repeatedly step `θ` against
//! the full-batch gradient of a [`CostFunction`] until a tolerance is met or
//! the iteration budget runs out.
//!
//! Key behaviors
//! -------------
//! - Update rule `θ_{k+1} = θ_k − η_k ∇c(θ_k)` with a configurable
//!   [`StepSchedule`] (constant or inverse decay).
//! - Convergence when `‖∇c(θ_k)‖₂ < tol_grad` or
//!   `|c(θ_{k−1}) − c(θ_k)| < tol_cost`, whichever is configured.
//! - Divergence (non-finite cost, gradient or iterate) stops the run with
//!   [`Status::OutOfIterations`], keeping the last finite `θ`.
//! - Records the cost at the start of every iteration in
//!   [`OptimOutcome::cost_history`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The run performs at most `max_iter` updates (`DEFAULT_MAX_ITER` when
//!   the tolerances carry no cap), so `optimize` always returns.
//! - The design matrix and targets are only ever borrowed.
//!
//! Testing notes
//! -------------
//! - Unit tests use a separable quadratic cost to check convergence,
//!   budget exhaustion, monotone cost on a convex problem, step schedules
//!   and divergence handling.
use crate::optimization::{
    errors::OptResult,
    optimizer::{
        traits::{CostFunction, OptimOutcome, Optimizer, Status, Tolerances, l2_norm},
        types::{Cost, DEFAULT_MAX_ITER, FnEvalMap, Theta},
        validation::{is_finite_step, verify_decay, verify_learning_rate},
    },
};
use ndarray::{ArrayView1, ArrayView2};

/// Step-size schedule `η_k` for descent strategies.
///
/// - `Constant`: `η_k = η₀`.
/// - `InverseDecay { decay }`: `η_k = η₀ / (1 + decay · k)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepSchedule {
    Constant,
    InverseDecay { decay: f64 },
}

impl StepSchedule {
    /// Step size at iteration `k` for base rate `eta0`.
    pub fn step(&self, eta0: f64, k: usize) -> f64 {
        match self {
            StepSchedule::Constant => eta0,
            StepSchedule::InverseDecay { decay } => eta0 / (1.0 + decay * k as f64),
        }
    }
}

/// Options for [`BatchGradientDescent`].
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 10_000`
/// - `learning_rate`: `0.1`
/// - `schedule`: [`StepSchedule::Constant`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientDescentOptions {
    pub tols: Tolerances,
    pub learning_rate: f64,
    pub schedule: StepSchedule,
}

impl GradientDescentOptions {
    /// Build validated options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLearningRate`](crate::optimization::errors::OptError::InvalidLearningRate)
    ///   for a non-finite or non-positive `learning_rate`.
    /// - [`OptError::InvalidDecay`](crate::optimization::errors::OptError::InvalidDecay)
    ///   for a negative or non-finite inverse-decay coefficient.
    pub fn new(tols: Tolerances, learning_rate: f64, schedule: StepSchedule) -> OptResult<Self> {
        verify_learning_rate(learning_rate)?;
        if let StepSchedule::InverseDecay { decay } = schedule {
            verify_decay(decay)?;
        }
        Ok(Self { tols, learning_rate, schedule })
    }
}

impl Default for GradientDescentOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            learning_rate: 0.1,
            schedule: StepSchedule::Constant,
        }
    }
}

/// Full-batch gradient descent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchGradientDescent {
    pub options: GradientDescentOptions,
}

impl BatchGradientDescent {
    pub fn new(options: GradientDescentOptions) -> Self {
        Self { options }
    }

    fn max_iter(&self) -> usize {
        self.options.tols.max_iter.unwrap_or(DEFAULT_MAX_ITER)
    }
}

impl Optimizer for BatchGradientDescent {
    fn optimize(
        &self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, theta0: Theta,
        cost: &dyn CostFunction,
    ) -> OptimOutcome {
        let dim = theta0.len();
        let max_iter = self.max_iter();
        let tols = self.options.tols;
        let mut run = RunLog::default();
        let mut theta = theta0;
        let mut prev: Option<(Theta, Cost)> = None;
        let mut k = 0;

        loop {
            let (c, g) = cost.evaluate(x, theta.view(), y);
            run.cost_count += 1;
            if !is_finite_step(c, &g, dim) {
                let (theta_hat, last_cost) = prev.unwrap_or((theta, c));
                return run.finish(theta_hat, Status::OutOfIterations, last_cost, k, None, DIVERGED);
            }
            run.history.push(c);
            let grad_norm = l2_norm(&g);
            log::trace!("gd iter {k}: cost = {c:.6e}, ||grad|| = {grad_norm:.6e}");

            if tols.tol_grad.is_some_and(|tol| grad_norm < tol) {
                return run.finish(theta, Status::Converged, c, k, Some(grad_norm), GRAD_MET);
            }
            if let (Some(tol), Some((_, prev_cost))) = (tols.tol_cost, prev.as_ref()) {
                if (prev_cost - c).abs() < tol {
                    return run.finish(theta, Status::Converged, c, k, Some(grad_norm), COST_MET);
                }
            }
            if k >= max_iter {
                return run.finish(
                    theta,
                    Status::OutOfIterations,
                    c,
                    k,
                    Some(grad_norm),
                    BUDGET_SPENT,
                );
            }

            let eta = self.options.schedule.step(self.options.learning_rate, k);
            let next = &theta - &(&g * eta);
            if next.iter().any(|v| !v.is_finite()) {
                return run.finish(theta, Status::OutOfIterations, c, k, Some(grad_norm), DIVERGED);
            }
            prev = Some((std::mem::replace(&mut theta, next), c));
            k += 1;
        }
    }

    fn converge_hints(&self) -> String {
        format!(
            "Batch gradient descent stopped before meeting its tolerance. If the cost \
             oscillated or grew, lower learning_rate (currently {}) or use an InverseDecay \
             schedule; if it was still falling steadily, raise max_iter (currently {}) or \
             loosen tol_grad/tol_cost. Features on similar scales converge faster.",
            self.options.learning_rate,
            self.max_iter()
        )
    }
}

// ---- Termination messages ----

pub(crate) const GRAD_MET: &str = "gradient norm below tolerance";
pub(crate) const COST_MET: &str = "cost change below tolerance";
pub(crate) const BUDGET_SPENT: &str = "maximum iterations reached";
pub(crate) const DIVERGED: &str = "diverged: non-finite cost, gradient or parameters";

/// Bookkeeping shared by the hand-written descent loops.
#[derive(Debug, Default)]
pub(crate) struct RunLog {
    pub(crate) history: Vec<Cost>,
    pub(crate) cost_count: u64,
}

impl RunLog {
    pub(crate) fn finish(
        self, theta_hat: Theta, status: Status, cost: Cost, iterations: usize,
        grad_norm: Option<f64>, message: &str,
    ) -> OptimOutcome {
        log::debug!(
            "descent finished: {status} after {iterations} iterations ({message}), cost = {cost:.6e}"
        );
        let mut fn_evals = FnEvalMap::new();
        fn_evals.insert("cost_count".to_string(), self.cost_count);
        fn_evals.insert("gradient_count".to_string(), self.cost_count);
        OptimOutcome {
            theta_hat,
            status,
            cost,
            iterations,
            grad_norm,
            cost_history: self.history,
            fn_evals,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{errors::OptError, optimizer::types::Grad};
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, Array2, array};

    /// c(θ) = ½‖θ − target‖², ignoring X and y.
    struct Quadratic {
        target: Array1<f64>,
    }

    impl CostFunction for Quadratic {
        fn evaluate(
            &self, _x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>, _y: ArrayView1<'_, f64>,
        ) -> (Cost, Grad) {
            let diff = &theta - &self.target;
            (0.5 * diff.dot(&diff), diff)
        }
    }

    /// Finite while θ₀ < 1, NaN beyond.
    struct BlowsUp;

    impl CostFunction for BlowsUp {
        fn evaluate(
            &self, _x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>, _y: ArrayView1<'_, f64>,
        ) -> (Cost, Grad) {
            if theta[0] > 1.0 { (f64::NAN, array![f64::NAN]) } else { (-theta[0], array![-1.0]) }
        }
    }

    fn empty_data() -> (Array2<f64>, Array1<f64>) {
        (Array2::zeros((1, 2)), Array1::zeros(1))
    }

    fn gd(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: usize, lr: f64,
    ) -> BatchGradientDescent {
        let tols = Tolerances::new(tol_grad, tol_cost, Some(max_iter)).expect("valid tolerances");
        let opts =
            GradientDescentOptions::new(tols, lr, StepSchedule::Constant).expect("valid options");
        BatchGradientDescent::new(opts)
    }

    #[test]
    // Purpose
    // -------
    // Gradient descent reaches the minimizer of a well-conditioned quadratic
    // and reports `Converged`.
    //
    // Given
    // -----
    // - c(θ) = ½‖θ − (1, −2)‖², θ₀ = 0, learning rate 0.5, tol_grad 1e-8.
    //
    // Expect
    // ------
    // - Status `Converged`, θ̂ ≈ (1, −2), final gradient norm below 1e-8.
    fn converges_on_quadratic() {
        // Arrange
        let (x, y) = empty_data();
        let cost = Quadratic { target: array![1.0, -2.0] };
        let opt = gd(Some(1e-8), None, 1000, 0.5);

        // Act
        let out = opt.optimize(x.view(), y.view(), Array1::zeros(2), &cost);

        // Assert
        assert_eq!(out.status, Status::Converged);
        assert_abs_diff_eq!(out.theta_hat[0], 1.0, epsilon = 1e-7);
        assert_abs_diff_eq!(out.theta_hat[1], -2.0, epsilon = 1e-7);
        assert!(out.grad_norm.expect("gradient norm recorded") < 1e-8);
        assert_eq!(out.message, GRAD_MET);
    }

    #[test]
    // Purpose
    // -------
    // A tiny iteration budget ends the run with `OutOfIterations` and exactly
    // `max_iter` updates.
    fn exhausts_budget() {
        let (x, y) = empty_data();
        let cost = Quadratic { target: array![10.0, 10.0] };
        let opt = gd(Some(1e-12), None, 3, 0.01);

        let out = opt.optimize(x.view(), y.view(), Array1::zeros(2), &cost);

        assert_eq!(out.status, Status::OutOfIterations);
        assert_eq!(out.iterations, 3);
        assert_eq!(out.cost_history.len(), 4);
        assert_eq!(out.fn_evals["cost_count"], 4);
        assert!(opt.converge_hints().contains("max_iter (currently 3)"));
    }

    #[test]
    // Purpose
    // -------
    // On a convex problem with a stable step the recorded cost never rises.
    fn cost_history_is_non_increasing() {
        let (x, y) = empty_data();
        let cost = Quadratic { target: array![3.0, -1.0] };
        let opt = gd(Some(1e-10), None, 500, 0.3);

        let out = opt.optimize(x.view(), y.view(), Array1::zeros(2), &cost);

        assert!(out.cost_history.windows(2).all(|w| w[1] <= w[0] + 1e-12));
    }

    #[test]
    fn cost_tolerance_alone_stops_the_run() {
        let (x, y) = empty_data();
        let cost = Quadratic { target: array![1.0, 1.0] };
        let opt = gd(None, Some(1e-10), 10_000, 0.5);

        let out = opt.optimize(x.view(), y.view(), Array1::zeros(2), &cost);

        assert_eq!(out.status, Status::Converged);
        assert_eq!(out.message, COST_MET);
    }

    #[test]
    // Purpose
    // -------
    // Numerical blow-up is reported as `OutOfIterations`, never as a panic,
    // and the last finite iterate is kept.
    //
    // Given
    // -----
    // - A cost that turns NaN once θ₀ > 1, learning rate 0.4, θ₀ = 0.
    //
    // Expect
    // ------
    // - Status `OutOfIterations`, message mentions divergence, θ̂ finite and
    //   ≤ 1.
    fn divergence_keeps_last_finite_theta() {
        let x = Array2::zeros((1, 1));
        let y = Array1::zeros(1);
        let opt = gd(Some(1e-12), None, 100, 0.4);

        let out = opt.optimize(x.view(), y.view(), Array1::zeros(1), &BlowsUp);

        assert_eq!(out.status, Status::OutOfIterations);
        assert_eq!(out.message, DIVERGED);
        assert!(out.theta_hat[0].is_finite() && out.theta_hat[0] <= 1.0);
    }

    #[test]
    fn inverse_decay_shrinks_steps() {
        let schedule = StepSchedule::InverseDecay { decay: 1.0 };
        assert_eq!(schedule.step(1.0, 0), 1.0);
        assert_eq!(schedule.step(1.0, 1), 0.5);
        assert_eq!(schedule.step(1.0, 3), 0.25);
        assert_eq!(StepSchedule::Constant.step(0.2, 99), 0.2);
    }

    #[test]
    fn options_validate_rate_and_decay() {
        let tols = Tolerances::default();
        assert!(matches!(
            GradientDescentOptions::new(tols, 0.0, StepSchedule::Constant),
            Err(OptError::InvalidLearningRate { .. })
        ));
        assert!(matches!(
            GradientDescentOptions::new(tols, 0.1, StepSchedule::InverseDecay { decay: -1.0 }),
            Err(OptError::InvalidDecay { .. })
        ));
    }

    #[test]
    fn missing_cap_falls_back_to_default() {
        let tols = Tolerances::new(Some(1e-300), None, None).expect("valid tolerances");
        let opt = BatchGradientDescent::new(
            GradientDescentOptions::new(tols, 1e-6, StepSchedule::Constant).expect("valid options"),
        );
        let (x, y) = empty_data();
        let cost = Quadratic { target: array![1.0, 1.0] };

        let out = opt.optimize(x.view(), y.view(), Array1::zeros(2), &cost);

        assert_eq!(out.status, Status::OutOfIterations);
        assert_eq!(out.iterations, DEFAULT_MAX_ITER);
    }
}
