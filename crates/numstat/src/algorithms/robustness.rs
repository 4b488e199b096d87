//! Robustness weights for iterative LOWESS.
//!
//! ## Purpose
//!
//! After each pass, points with large residuals are down-weighted with a
//! bisquare function of the residual relative to six median absolute
//! residuals, so outliers lose influence on the next pass.
//!
//! ## Invariants
//!
//! * Weights are in `[0, 1]`.
//! * All-zero residuals give every point weight 1.
//! * A zero scale gives every non-zero residual weight 0.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::kernel::residual_weight;
use crate::math::scaling::residual_scale;

/// Recompute `weights` from `residuals`, using `scratch` for the scale estimate.
pub fn update_robustness_weights<T: Float>(residuals: &[T], scratch: &mut [T], weights: &mut [T]) {
    let n = residuals.len();
    if n == 0 {
        return;
    }

    scratch[..n].copy_from_slice(residuals);
    let cmad = residual_scale(&mut scratch[..n]);

    for (w, &r) in weights.iter_mut().zip(residuals) {
        *w = residual_weight(r.abs(), cmad);
    }
}
