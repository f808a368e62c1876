//! Execution helper that runs an `argmin` solver on a bound cost surface and
//! returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptError,
    optimizer::{
        lbfgs::{LbfgsOptions, adapter::ArgMinAdapter},
        traits::{OptimOutcome, Status, l2_norm},
        types::{Cost, DEFAULT_MAX_ITER, FnEvalMap, Grad, Theta},
    },
};
use argmin::core::{Executor, State, TerminationReason, TerminationStatus};

/// Run an `argmin` solver and normalize the result.
///
/// Wires up the adapted problem, the chosen `solver`, the initial parameter
/// `theta0`, the iteration cap (`DEFAULT_MAX_ITER` when unset) and, with the
/// `obs_slog` feature and `opts.verbose`, a terminal slog observer.
///
/// Never fails: an `argmin` runtime error (e.g. a line search that cannot
/// make progress) is logged and reported as [`Status::OutOfIterations`].
/// The final parameters are the best ones the tracking adapter recorded,
/// or `theta0` when the adapter does not track.
pub fn run_lbfgs<'a, S>(
    theta0: Theta, opts: &LbfgsOptions, problem: ArgMinAdapter<'a>, solver: S,
) -> OptimOutcome
where
    S: argmin::core::Solver<
            ArgMinAdapter<'a>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    let (cost0, grad0) = problem.evaluate(&theta0);
    if opts.verbose {
        log::info!("lbfgs init: c(theta0) = {:.6}, ||grad|| = {:.6}", cost0, l2_norm(&grad0));
    }
    let fallback = theta0.clone();
    let max_iter = opts.tols.max_iter.unwrap_or(DEFAULT_MAX_ITER);

    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0).max_iters(max_iter as u64));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }

    let mut result = match optimizer.run() {
        Ok(res) => res.state().clone(),
        Err(err) => {
            let err = OptError::from(err);
            let Some(theta) = problem.take_best() else {
                log::warn!("lbfgs backend error, keeping initial parameters: {err}");
                return backend_failure(fallback, cost0, &grad0, &err);
            };
            log::warn!("lbfgs backend error, keeping best parameters reached: {err}");
            let (cost, grad) = problem.evaluate(&theta);
            return backend_failure(theta, cost, &grad, &err);
        }
    };
    let iterations = result.get_iter() as usize;
    let fn_evals = result.get_func_counts().clone();
    let (status, message) = map_termination(result.get_termination_status());
    let grad_norm = result.take_gradient().map(|g| l2_norm(&g));
    let cost = result.get_best_cost();
    let theta_hat = result.take_best_param().unwrap_or(fallback);
    log::debug!("lbfgs finished: {status} after {iterations} iterations ({message}), cost = {cost:.6e}");

    OptimOutcome {
        theta_hat,
        status,
        cost,
        iterations,
        grad_norm,
        cost_history: Vec::new(),
        fn_evals,
        message,
    }
}

/// Outcome for a run that could not be carried out by the backend.
pub fn backend_failure(theta0: Theta, cost0: Cost, grad0: &Grad, err: &OptError) -> OptimOutcome {
    let grad_norm = l2_norm(grad0);
    OptimOutcome {
        theta_hat: theta0,
        status: Status::OutOfIterations,
        cost: cost0,
        iterations: 0,
        grad_norm: grad_norm.is_finite().then_some(grad_norm),
        cost_history: Vec::new(),
        fn_evals: FnEvalMap::new(),
        message: format!("solver error: {err}"),
    }
}

/// Map Argmin's termination status onto the two-valued [`Status`].
///
/// Only `SolverConverged` and `TargetCostReached` count as convergence;
/// iteration caps, interrupts, timeouts and solver exits do not.
pub fn map_termination(status: &TerminationStatus) -> (Status, String) {
    match status {
        TerminationStatus::Terminated(
            reason @ (TerminationReason::SolverConverged | TerminationReason::TargetCostReached),
        ) => (Status::Converged, format!("{reason:?}")),
        TerminationStatus::Terminated(reason) => (Status::OutOfIterations, format!("{reason:?}")),
        TerminationStatus::NotTerminated => {
            (Status::OutOfIterations, "Not terminated".to_string())
        }
    }
}
