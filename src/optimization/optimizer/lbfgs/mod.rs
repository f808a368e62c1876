//! lbfgs — quasi-Newton strategy backed by Argmin's L-BFGS.
//!
//! Purpose
//! -------
//! Offer a faster-converging alternative to plain gradient descent behind
//! the same [`Optimizer`] contract. The crate's [`CostFunction`] is bound to
//! the data through [`adapter::ArgMinAdapter`], a solver is built with the
//! configured line search in [`builders`], and [`run::run_lbfgs`] executes
//! it and folds Argmin's termination status into the two-valued [`Status`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `optimize` never fails: builder or runtime errors from Argmin end the
//!   run with [`Status::OutOfIterations`]. A builder error keeps the initial
//!   `θ`; a runtime error keeps the best finite point evaluated so far.
//! - `max_iter` falls back to `DEFAULT_MAX_ITER`, so every run is bounded.
//!
//! Downstream usage
//! ----------------
//! - `LogisticRegression::new(Lbfgs::default())` swaps the strategy without
//!   touching model code.
//!
//! [`Status`]: crate::optimization::optimizer::traits::Status

pub mod adapter;
pub mod builders;
pub mod run;

use crate::optimization::{
    errors::{OptError, OptResult},
    optimizer::{
        traits::{CostFunction, LineSearcher, OptimOutcome, Optimizer, Tolerances},
        types::{DEFAULT_LBFGS_MEM, DEFAULT_MAX_ITER, Theta},
    },
};
use ndarray::{ArrayView1, ArrayView2};

use self::{
    adapter::{ArgMinAdapter, BestSeen},
    builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
    run::{backend_failure, run_lbfgs},
};

/// Options for [`Lbfgs`].
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher` — line-search algorithm used by L-BFGS.
/// - `verbose: bool` — log the initial state at `info` level and, behind
///   the `obs_slog` feature, attach Argmin's terminal observer.
/// - `lbfgs_mem: Option<usize>` — history size; `None` uses
///   [`DEFAULT_LBFGS_MEM`].
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 10_000`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl LbfgsOptions {
    /// Create a new set of L-BFGS options.
    ///
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] when `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// L-BFGS with a More–Thuente or Hager–Zhang line search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lbfgs {
    pub options: LbfgsOptions,
}

impl Lbfgs {
    pub fn new(options: LbfgsOptions) -> Self {
        Self { options }
    }
}

impl Optimizer for Lbfgs {
    fn optimize(
        &self, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>, theta0: Theta,
        cost: &dyn CostFunction,
    ) -> OptimOutcome {
        let best = BestSeen::default();
        let problem = ArgMinAdapter::new(cost, x.view(), y.view()).tracking(&best);
        let built = match self.options.line_searcher {
            LineSearcher::MoreThuente => build_optimizer_more_thuente(&self.options)
                .map(|solver| run_lbfgs(theta0.clone(), &self.options, problem, solver)),
            LineSearcher::HagerZhang => build_optimizer_hager_zhang(&self.options)
                .map(|solver| run_lbfgs(theta0.clone(), &self.options, problem, solver)),
        };
        built.unwrap_or_else(|err| {
            log::warn!("lbfgs solver could not be built: {err}");
            let (cost0, grad0) = problem.evaluate(&theta0);
            backend_failure(theta0, cost0, &grad0, &err)
        })
    }

    fn converge_hints(&self) -> String {
        format!(
            "L-BFGS stopped before meeting its tolerance. Raise max_iter (currently {}), \
             loosen tol_grad/tol_cost, try the other line search (currently {:?}), or \
             change the history size lbfgs_mem (currently {}). On perfectly separable \
             data the optimum lies at infinity and only the iteration cap stops the run.",
            self.options.tols.max_iter.unwrap_or(DEFAULT_MAX_ITER),
            self.options.line_searcher,
            self.options.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)
        )
    }
}
