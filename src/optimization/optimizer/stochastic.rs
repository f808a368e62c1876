//! optimizer::stochastic — seeded mini-batch gradient descent.
//!
//! Each epoch shuffles the sample order with a `ChaCha8Rng` seeded from
//! [`MiniBatchOptions::seed`], then takes one step per batch of
//! `batch_size` rows through the same [`CostFunction`] used for full-batch
//! descent. The stopping rule is checked once per epoch on the full batch,
//! so `Converged` means the same thing as for [`BatchGradientDescent`].
//! `max_iter` counts epochs.
//!
//! For a fixed seed the run is fully deterministic.
//!
//! [`BatchGradientDescent`]: crate::optimization::optimizer::gradient_descent::BatchGradientDescent
use crate::optimization::{
    errors::{OptError, OptResult},
    optimizer::{
        gradient_descent::{BUDGET_SPENT, COST_MET, DIVERGED, GRAD_MET, RunLog, StepSchedule},
        traits::{CostFunction, OptimOutcome, Optimizer, Status, Tolerances, l2_norm},
        types::{Cost, DEFAULT_MAX_ITER, Theta},
        validation::{is_finite_step, verify_decay, verify_learning_rate},
    },
};
use ndarray::{ArrayView1, ArrayView2, Axis};
use rand::{SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;

/// Options for [`MiniBatchGradientDescent`].
///
/// Default: `tol_grad = 1e-6`, `max_iter = 10_000` epochs, learning rate
/// `0.1` with constant steps, `batch_size = 32`, `seed = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiniBatchOptions {
    pub tols: Tolerances,
    pub learning_rate: f64,
    pub schedule: StepSchedule,
    pub batch_size: usize,
    pub seed: u64,
}

impl MiniBatchOptions {
    /// Build validated options.
    ///
    /// # Errors
    /// - `OptError::InvalidLearningRate` / `OptError::InvalidDecay` as for
    ///   full-batch descent.
    /// - [`OptError::InvalidBatchSize`] when `batch_size == 0`.
    pub fn new(
        tols: Tolerances, learning_rate: f64, schedule: StepSchedule, batch_size: usize, seed: u64,
    ) -> OptResult<Self> {
        verify_learning_rate(learning_rate)?;
        if let StepSchedule::InverseDecay { decay } = schedule {
            verify_decay(decay)?;
        }
        if batch_size == 0 {
            return Err(OptError::InvalidBatchSize {
                size: batch_size,
                reason: "Batch size must be at least one.",
            });
        }
        Ok(Self { tols, learning_rate, schedule, batch_size, seed })
    }
}

impl Default for MiniBatchOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            learning_rate: 0.1,
            schedule: StepSchedule::Constant,
            batch_size: 32,
            seed: 0,
        }
    }
}

/// Mini-batch (stochastic) gradient descent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiniBatchGradientDescent {
    pub options: MiniBatchOptions,
}

impl MiniBatchGradientDescent {
    pub fn new(options: MiniBatchOptions) -> Self {
        Self { options }
    }

    fn max_epochs(&self) -> usize {
        self.options.tols.max_iter.unwrap_or(DEFAULT_MAX_ITER)
    }

    /// One pass over the shuffled samples, starting from `theta`. Returns
    /// `None` if a batch step produced non-finite output.
    fn run_epoch(
        &self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, theta: &Theta,
        cost: &dyn CostFunction, order: &[usize], eta: f64, run: &mut RunLog,
    ) -> Option<Theta> {
        let dim = theta.len();
        let mut work = theta.clone();
        for batch in order.chunks(self.options.batch_size) {
            let xb = x.select(Axis(0), batch);
            let yb = y.select(Axis(0), batch);
            let (c, g) = cost.evaluate(xb.view(), work.view(), yb.view());
            run.cost_count += 1;
            if !is_finite_step(c, &g, dim) {
                return None;
            }
            work.scaled_add(-eta, &g);
            if work.iter().any(|v| !v.is_finite()) {
                return None;
            }
        }
        Some(work)
    }
}

impl Optimizer for MiniBatchGradientDescent {
    fn optimize(
        &self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, theta0: Theta,
        cost: &dyn CostFunction,
    ) -> OptimOutcome {
        let dim = theta0.len();
        let max_epochs = self.max_epochs();
        let tols = self.options.tols;
        let mut rng = ChaCha8Rng::seed_from_u64(self.options.seed);
        let mut order: Vec<usize> = (0..x.nrows()).collect();
        let mut run = RunLog::default();
        let mut theta = theta0;
        let mut prev: Option<(Theta, Cost)> = None;
        let mut epoch = 0;

        loop {
            let (c, g) = cost.evaluate(x, theta.view(), y);
            run.cost_count += 1;
            if !is_finite_step(c, &g, dim) {
                let (theta_hat, last_cost) = prev.unwrap_or((theta, c));
                return run.finish(
                    theta_hat,
                    Status::OutOfIterations,
                    last_cost,
                    epoch,
                    None,
                    DIVERGED,
                );
            }
            run.history.push(c);
            let grad_norm = l2_norm(&g);
            log::trace!("sgd epoch {epoch}: cost = {c:.6e}, ||grad|| = {grad_norm:.6e}");

            if tols.tol_grad.is_some_and(|tol| grad_norm < tol) {
                return run.finish(theta, Status::Converged, c, epoch, Some(grad_norm), GRAD_MET);
            }
            if let (Some(tol), Some((_, prev_cost))) = (tols.tol_cost, prev.as_ref()) {
                if (prev_cost - c).abs() < tol {
                    return run.finish(theta, Status::Converged, c, epoch, Some(grad_norm), COST_MET);
                }
            }
            if epoch >= max_epochs {
                return run.finish(
                    theta,
                    Status::OutOfIterations,
                    c,
                    epoch,
                    Some(grad_norm),
                    BUDGET_SPENT,
                );
            }

            order.shuffle(&mut rng);
            let eta = self.options.schedule.step(self.options.learning_rate, epoch);
            let Some(next) = self.run_epoch(x, y, &theta, cost, &order, eta, &mut run) else {
                return run.finish(
                    theta,
                    Status::OutOfIterations,
                    c,
                    epoch,
                    Some(grad_norm),
                    DIVERGED,
                );
            };
            prev = Some((std::mem::replace(&mut theta, next), c));
            epoch += 1;
        }
    }

    fn converge_hints(&self) -> String {
        format!(
            "Mini-batch gradient descent stopped before meeting its tolerance. Noisy batch \
             gradients keep the iterate jittering around the minimum: use an InverseDecay \
             schedule or a smaller learning_rate (currently {}), a larger batch_size \
             (currently {}), or more epochs via max_iter (currently {}).",
            self.options.learning_rate,
            self.options.batch_size,
            self.max_epochs()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::optimizer::types::Grad;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, Array2, array};

    /// Least squares `c(θ) = (1/2m) ‖Xθ − y‖²`.
    struct LeastSquares;

    impl CostFunction for LeastSquares {
        fn evaluate(
            &self, x: ArrayView2<'_, f64>, theta: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>,
        ) -> (Cost, Grad) {
            let m = y.len() as f64;
            let resid = x.dot(&theta) - y;
            let cost = resid.dot(&resid) / (2.0 * m);
            let grad = x.t().dot(&resid) / m;
            (cost, grad)
        }
    }

    fn line_data() -> (Array2<f64>, Array1<f64>) {
        // y = 1 + 2x on x = 0, 0.1, ..., 1.9, bias column first.
        let n = 20;
        let mut x = Array2::ones((n, 2));
        let mut y = Array1::zeros(n);
        for i in 0..n {
            let xi = i as f64 * 0.1;
            x[[i, 1]] = xi;
            y[i] = 1.0 + 2.0 * xi;
        }
        (x, y)
    }

    fn sgd(batch_size: usize, seed: u64) -> MiniBatchGradientDescent {
        let tols = Tolerances::new(Some(1e-6), None, Some(5_000)).expect("valid tolerances");
        MiniBatchGradientDescent::new(
            MiniBatchOptions::new(tols, 0.1, StepSchedule::Constant, batch_size, seed)
                .expect("valid options"),
        )
    }

    #[test]
    // Purpose
    // -------
    // Mini-batch descent recovers the coefficients of a noiseless linear
    // relation and reports `Converged` on the full-batch criterion.
    //
    // Given
    // -----
    // - y = 1 + 2x on 20 points, batch size 5, seed 7.
    //
    // Expect
    // ------
    // - Status `Converged`, θ̂ ≈ (1, 2).
    fn recovers_noiseless_line() {
        // Arrange
        let (x, y) = line_data();

        // Act
        let out = sgd(5, 7).optimize(x.view(), y.view(), Array1::zeros(2), &LeastSquares);

        // Assert
        assert_eq!(out.status, Status::Converged);
        assert_abs_diff_eq!(out.theta_hat[0], 1.0, epsilon = 1e-4);
        assert_abs_diff_eq!(out.theta_hat[1], 2.0, epsilon = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // A fixed seed makes the run reproducible bit for bit.
    fn same_seed_same_result() {
        let (x, y) = line_data();

        let a = sgd(3, 42).optimize(x.view(), y.view(), Array1::zeros(2), &LeastSquares);
        let b = sgd(3, 42).optimize(x.view(), y.view(), Array1::zeros(2), &LeastSquares);

        assert_eq!(a.theta_hat, b.theta_hat);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn batch_larger_than_sample_count_is_full_batch() {
        let (x, y) = line_data();
        let out = sgd(1_000, 0).optimize(x.view(), y.view(), Array1::zeros(2), &LeastSquares);
        assert_eq!(out.status, Status::Converged);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = MiniBatchOptions::new(Tolerances::default(), 0.1, StepSchedule::Constant, 0, 0)
            .expect_err("zero batch size must be rejected");
        assert!(matches!(err, OptError::InvalidBatchSize { size: 0, .. }));
    }

    #[test]
    fn hints_name_batch_size() {
        assert!(sgd(8, 0).converge_hints().contains("batch_size (currently 8)"));
    }

    #[test]
    fn exploding_step_reports_out_of_iterations() {
        // Learning rate far beyond 2/L makes the iterate blow up.
        let (x, y) = line_data();
        let tols = Tolerances::new(Some(1e-12), None, Some(10_000)).expect("valid tolerances");
        let opt = MiniBatchGradientDescent::new(
            MiniBatchOptions::new(tols, 1e3, StepSchedule::Constant, 4, 1).expect("valid options"),
        );

        let out = opt.optimize(x.view(), y.view(), array![0.0, 0.0], &LeastSquares);

        assert_eq!(out.status, Status::OutOfIterations);
        assert!(out.theta_hat.iter().all(|v| v.is_finite()));
    }
}
