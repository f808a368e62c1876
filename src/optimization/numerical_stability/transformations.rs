//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear transforms used by
//! probabilistic classifiers, which are prone to overflow/underflow in
//! naïve form.
//!
//! # Provided items
//! - [`PROB_EPS`]: the clamping margin for probabilities fed into a
//!   logarithm (1e-15).
//! - [`safe_logistic(x)`]: stable version of `1 / (1 + exp(-x))`,
//!   mapping ℝ → [0, 1] without overflow.
//! - [`clamp_probability(p)`]: pin a probability into
//!   `[PROB_EPS, 1 − PROB_EPS]` so `ln(p)` and `ln(1 − p)` stay finite.
//! - [`logistic_inplace`]: elementwise [`safe_logistic`] over an array.
use ndarray::Array1;

/// Clamping margin for probabilities entering a logarithm.
///
/// A fitted logistic score of magnitude above ~37 already rounds `σ(z)` to
/// exactly `1.0` in `f64`, which makes `ln(1 − p)` undefined. The log-loss
/// clamps every probability into `[PROB_EPS, 1 − PROB_EPS]` first, so a
/// single confidently-wrong sample costs at most `−ln(1e-15) ≈ 34.54`.
pub const PROB_EPS: f64 = 1e-15;

/// Numerically stable logistic (sigmoid) function `σ(x) = 1 / (1 + e^{−x})`.
///
/// Evaluates the branch that never exponentiates a large positive number:
/// - for `x ≥ 0`: `1 / (1 + e^{−x})`,
/// - for `x < 0`: `e^{x} / (1 + e^{x})`.
///
/// The result is exactly `0.0` or `1.0` only once `|x|` is far enough out
/// that the true value is not representable; it is never `NaN` for finite
/// input.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Clamp a probability into `[PROB_EPS, 1 − PROB_EPS]`.
pub fn clamp_probability(p: f64) -> f64 {
    p.clamp(PROB_EPS, 1.0 - PROB_EPS)
}

/// Apply [`safe_logistic`] to every element of `scores` in place.
pub fn logistic_inplace(scores: &mut Array1<f64>) {
    scores.mapv_inplace(safe_logistic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Confirm agreement of `safe_logistic` with the naïve formula on a grid
    // where the naïve form is well conditioned.
    //
    // Given
    // -----
    // - x in [-20, 20] in steps of 0.5.
    //
    // Expect
    // ------
    // - |safe_logistic(x) − 1/(1+e^{−x})| < 1e-15.
    fn safe_logistic_matches_naive_on_safe_grid() {
        for i in -40..=40 {
            let x = i as f64 * 0.5;
            let naive = 1.0 / (1.0 + (-x).exp());
            assert_abs_diff_eq!(safe_logistic(x), naive, epsilon = 1e-15);
        }
    }

    #[test]
    // Purpose
    // -------
    // Tail behavior: the stable branches saturate to the bounds instead of
    // producing NaN.
    //
    // Expect
    // ------
    // - σ(±1000) is exactly 1 / 0, σ(0) is 0.5, and σ(x) + σ(−x) = 1.
    fn safe_logistic_tails_and_symmetry() {
        assert_eq!(safe_logistic(1000.0), 1.0);
        assert_eq!(safe_logistic(-1000.0), 0.0);
        assert_eq!(safe_logistic(0.0), 0.5);
        for &x in &[0.1, 1.0, 3.7, 12.0] {
            assert_abs_diff_eq!(safe_logistic(x) + safe_logistic(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn clamp_probability_keeps_logs_finite() {
        assert_eq!(clamp_probability(0.0), PROB_EPS);
        assert_eq!(clamp_probability(1.0), 1.0 - PROB_EPS);
        assert_eq!(clamp_probability(0.3), 0.3);
        assert!(clamp_probability(0.0).ln().is_finite());
        assert!((1.0 - clamp_probability(1.0)).ln().is_finite());
    }

    #[test]
    fn logistic_inplace_maps_every_element() {
        let mut scores = array![-2.0, 0.0, 2.0];
        logistic_inplace(&mut scores);
        assert_abs_diff_eq!(scores[0], safe_logistic(-2.0));
        assert_eq!(scores[1], 0.5);
        assert_abs_diff_eq!(scores[2], safe_logistic(2.0));
    }
}
