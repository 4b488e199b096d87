//! Local weighted regression at a single query point.
//!
//! ## Purpose
//!
//! This module evaluates the LOWESS fit at one x-value: tricube-weight the
//! neighborhood, normalize, optionally tilt the weights by a local linear
//! slope term, and return the weighted average of `y`.
//!
//! ## Design notes
//!
//! * **Tie pickup**: The weight scan starts at the window's left edge and keeps
//!   going past its right edge while points stay within `0.999 h`, so x-ties at
//!   the boundary share the fit.
//! * **Degenerate spread**: The slope term is skipped when the weighted spread of
//!   x is at most `0.001 × range(x)`, falling back to a local constant.
//! * **Fallback**: A neighborhood with no positive weight reports `None` and the
//!   caller keeps the observed `y`.
//!
//! ## Invariants
//!
//! * `x` is sorted ascending and `window` lies within it.
//! * Weights outside the scanned range are left untouched.
//!
//! ## Non-goals
//!
//! * Higher-degree local polynomials.
//! * Choosing the window; see the executor.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::kernel::{cutoffs, distance_weight, LOWER_CUTOFF};
use crate::primitives::window::Window;

/// Fitted value at `xs` from the points in `window` (plus right-hand ties).
///
/// `robustness_weights`, when present, multiply the kernel weights. `weights`
/// is scratch of length `x.len()`.
pub fn fit_point<T: Float>(
    x: &[T],
    y: &[T],
    xs: T,
    window: Window,
    robustness_weights: Option<&[T]>,
    weights: &mut [T],
) -> Option<T> {
    let n = x.len();
    let range = x[n - 1] - x[0];
    let h = window.max_distance(x, xs);
    let (_, h9) = cutoffs(h);

    // Kernel weights over the neighborhood
    let mut total = T::zero();
    let mut j = window.left;
    while j < n {
        let r = (x[j] - xs).abs();
        if r <= h9 {
            let mut w = distance_weight(r, h);
            if let Some(rw) = robustness_weights {
                w = w * rw[j];
            }
            weights[j] = w;
            total = total + w;
        } else if x[j] > xs {
            break;
        } else {
            weights[j] = T::zero();
        }
        j += 1;
    }

    if total <= T::zero() {
        return None;
    }
    let scanned = window.left..j;

    for w in &mut weights[scanned.clone()] {
        *w = *w / total;
    }

    // Local linear tilt
    if h > T::zero() {
        let a = scanned
            .clone()
            .fold(T::zero(), |acc, k| acc + weights[k] * x[k]);
        let b = xs - a;
        let c = scanned.clone().fold(T::zero(), |acc, k| {
            let d = x[k] - a;
            acc + weights[k] * d * d
        });

        let min_spread = T::from(LOWER_CUTOFF).unwrap_or_else(T::zero) * range;
        if c.sqrt() > min_spread {
            let slope = b / c;
            for k in scanned.clone() {
                weights[k] = weights[k] * (slope * (x[k] - a) + T::one());
            }
        }
    }

    Some(scanned.fold(T::zero(), |acc, k| acc + weights[k] * y[k]))
}
