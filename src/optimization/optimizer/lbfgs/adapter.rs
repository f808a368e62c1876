//! Adapter that exposes a crate [`CostFunction`] as an `argmin` problem.
//!
//! The adapter binds the cost surface to one design matrix and target
//! vector so that `argmin` only sees a function of `θ`. Cost and gradient
//! come from the same `evaluate` call; `argmin` asks for them separately,
//! so each request re-evaluates.
//!
//! An optional [`BestSeen`] slot records the lowest finite cost evaluated
//! and its `θ`, so a run that `argmin` aborts part-way can still report the
//! progress it made.
use crate::optimization::{
    errors::OptError,
    optimizer::{
        traits::CostFunction,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction as ArgminCostFunction, Error, Gradient};
use ndarray::{ArrayView1, ArrayView2};
use std::sync::Mutex;

/// Lowest finite cost seen during a run, with the `θ` that produced it.
pub type BestSeen = Mutex<Option<(Cost, Theta)>>;

/// Bridges a crate [`CostFunction`] to `argmin`'s `CostFunction` and
/// `Gradient`.
///
/// - `cost` returns `c(θ)` and rejects non-finite values with
///   [`OptError::NonFiniteCost`].
/// - `gradient` returns `∇c(θ)` after dimension/finiteness validation.
#[derive(Clone, Copy)]
pub struct ArgMinAdapter<'a> {
    pub cost: &'a dyn CostFunction,
    pub x: ArrayView2<'a, f64>,
    pub y: ArrayView1<'a, f64>,
    pub best: Option<&'a BestSeen>,
}

impl<'a> ArgMinAdapter<'a> {
    /// Construct a new adapter over a cost surface and its data.
    pub fn new(cost: &'a dyn CostFunction, x: ArrayView2<'a, f64>, y: ArrayView1<'a, f64>) -> Self {
        Self { cost, x, y, best: None }
    }

    /// Record every finite evaluation into `best`.
    pub fn tracking(self, best: &'a BestSeen) -> Self {
        Self { best: Some(best), ..self }
    }

    /// Evaluate cost and gradient together, without validation.
    pub fn evaluate(&self, theta: &Theta) -> (Cost, Grad) {
        let (cost, grad) = self.cost.evaluate(self.x, theta.view(), self.y);
        self.record(theta, cost);
        (cost, grad)
    }

    /// Take the recorded best `θ`, leaving the slot empty.
    pub fn take_best(&self) -> Option<Theta> {
        self.best?.lock().ok()?.take().map(|(_, theta)| theta)
    }

    fn record(&self, theta: &Theta, cost: Cost) {
        let Some(best) = self.best else { return };
        if !cost.is_finite() {
            return;
        }
        if let Ok(mut slot) = best.lock() {
            if slot.as_ref().is_none_or(|(c, _)| cost < *c) {
                *slot = Some((cost, theta.clone()));
            }
        }
    }
}

impl ArgminCostFunction for ArgMinAdapter<'_> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let (value, _) = self.evaluate(theta);
        if !value.is_finite() {
            return Err((OptError::NonFiniteCost { value }).into());
        }
        Ok(value)
    }
}

impl Gradient for ArgMinAdapter<'_> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let (_, grad) = self.evaluate(theta);
        validate_grad(&grad, theta.len())?;
        Ok(grad)
    }
}
