//! lbfgs::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the L-BFGS solvers behind
//! [`Lbfgs`](super::Lbfgs). These helpers hide Argmin’s generic wiring and
//! apply crate-level options (tolerances, memory size) so that the strategy
//! can request a configured solver without touching Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS solvers with either Hager–Zhang or More–Thuente
//!   line search.
//! - Apply optional gradient and cost-change tolerances from
//!   [`LbfgsOptions`] via a shared configuration helper.
//! - Leave the initial parameter vector and maximum iterations to the
//!   runner, keeping these builders side-effect free.
//!
//! Conventions
//! -----------
//! - The L-BFGS memory (`m`) is either `opts.lbfgs_mem` or
//!   [`DEFAULT_LBFGS_MEM`].
//! - Tolerances rejected by Argmin surface as [`OptError`] via the crate’s
//!   `From<argmin::core::Error>` conversion.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    optimizer::{
        lbfgs::LbfgsOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search and the configured
/// tolerances.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance.
pub fn build_optimizer_hager_zhang(opts: &LbfgsOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search and the configured
/// tolerances.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance.
pub fn build_optimizer_more_thuente(opts: &LbfgsOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver of any line-search type.
///
/// When a tolerance is `None`, the corresponding `with_tolerance_*` method
/// is not called and Argmin’s default stays in effect.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &LbfgsOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        optimizer::traits::{LineSearcher, Tolerances},
    };

    #[test]
    // Purpose
    // -------
    // Both builders succeed with valid tolerances, with and without an
    // explicit memory size.
    fn builders_accept_valid_options() {
        let tols = Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("valid tolerances");
        let hz = LbfgsOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("valid options");
        let mt = LbfgsOptions::new(tols, LineSearcher::MoreThuente, false, Some(11))
            .expect("valid options");

        assert!(build_optimizer_hager_zhang(&hz).is_ok());
        assert!(build_optimizer_more_thuente(&mt).is_ok());
    }

    #[test]
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("valid tolerances");
        let opts = LbfgsOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("valid options");

        assert!(configure_lbfgs(raw, &opts).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Tolerances that bypassed `Tolerances::new` are still rejected, now by
    // Argmin, and surface as `OptError`.
    fn configure_lbfgs_surfaces_argmin_rejection() {
        let raw = LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM);
        let mut opts = LbfgsOptions::default();
        opts.tols.tol_grad = Some(-1.0);

        let Err(err) = configure_lbfgs(raw, &opts) else {
            panic!("negative tolerance must be rejected");
        };

        assert!(matches!(err, OptError::InvalidParameter { .. }));
    }
}
