//! Robust scale estimation for LOWESS residuals.
//!
//! ## Purpose
//!
//! This module computes the residual scale that drives the bisquare
//! robustness weights: six times the median absolute residual, taken as
//! `3 × (|r|_(m1) + |r|_(m2))` over the two middle order statistics.
//!
//! ## Design notes
//!
//! * **In-place**: Uses quickselect on a caller-owned scratch slice.
//! * **Order statistics**: `m1 = n / 2` and `m2 = n - m1 - 1`, which coincide for odd `n`.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Residual scale `3 × (|r|_(m1) + |r|_(m2))`.
///
/// Overwrites `vals` with absolute values in partially sorted order. Returns
/// zero for an empty slice.
#[inline]
pub fn residual_scale<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    for val in vals.iter_mut() {
        *val = val.abs();
    }

    let m1 = n / 2;
    let m2 = n - m1 - 1;

    vals.select_nth_unstable_by(m1, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[m1];

    let lower = if m2 == m1 {
        upper
    } else {
        // m2 = m1 - 1: largest value left of the pivot
        vals[..m1]
            .iter()
            .copied()
            .fold(T::neg_infinity(), T::max)
    };

    let three = T::from(3.0).unwrap_or_else(|| T::one() + T::one() + T::one());
    three * (upper + lower)
}
