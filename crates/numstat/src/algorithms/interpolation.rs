//! Delta-skipping and linear interpolation between fitted anchors.
//!
//! ## Purpose
//!
//! Points within `delta` of the last explicitly fitted point are not refit.
//! Exact x-ties copy the anchor's fit; the rest are filled by linear
//! interpolation once the next anchor is known.
//!
//! ## Key concepts
//!
//! * **Anchor**: a point whose value came from a local regression.
//! * **Resume point**: `max(last + 1, i - 1)`, where `i` is the first point
//!   beyond `delta`, so the next anchor sits at or just before the jump.

// External dependencies
use num_traits::Float;

/// Default merge distance: one percent of the x-range.
#[inline]
pub fn default_delta<T: Float>(x: &[T]) -> T {
    match (x.first(), x.last()) {
        (Some(&lo), Some(&hi)) => T::from(0.01).unwrap_or_else(T::zero) * (hi - lo),
        _ => T::zero(),
    }
}

/// Fill `fitted[left+1..right]` by linear interpolation between the anchors.
#[inline]
pub fn interpolate_gap<T: Float>(x: &[T], fitted: &mut [T], left: usize, right: usize) {
    let denom = x[right] - x[left];
    for j in left + 1..right {
        let alpha = (x[j] - x[left]) / denom;
        fitted[j] = alpha * fitted[right] + (T::one() - alpha) * fitted[left];
    }
}

/// Skip points within `delta` of the anchor at `last`, copying its fit to x-ties.
///
/// Returns the updated anchor and the index of the next point to fit.
pub fn skip_within_delta<T: Float>(
    x: &[T],
    fitted: &mut [T],
    mut last: usize,
    delta: T,
) -> (usize, usize) {
    let n = x.len();
    let cut = x[last] + delta;

    let mut i = last + 1;
    while i < n {
        if x[i] > cut {
            break;
        }
        if x[i] == x[last] {
            fitted[i] = fitted[last];
            last = i;
        }
        i += 1;
    }

    (last, usize::max(last + 1, i - 1))
}
