//! Sorting utilities for LOWESS input data.
//!
//! ## Purpose
//!
//! This module sorts `(x, y)` pairs ascending by `x` before smoothing. The
//! smoother reports results in sorted order, so no inverse permutation is kept.
//!
//! ## Design notes
//!
//! * **Stability**: Uses stable sorting to preserve the relative order of equal x-values.
//! * **Fast path**: Already-sorted input is copied without sorting.
//!
//! ## Invariants
//!
//! * Sorted x-values are non-decreasing.
//! * Every `y` stays paired with its original `x`.
//!
//! ## Non-goals
//!
//! * This module does not perform data validation or LOWESS calculation.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// ============================================================================
// Data Structures
// ============================================================================

/// Input pairs reordered by ascending x.
pub struct SortedData<T> {
    /// Sorted x-coordinates.
    pub x: Vec<T>,

    /// Y-coordinates reordered to match sorted x-coordinates.
    pub y: Vec<T>,
}

// ============================================================================
// Sorting Functions
// ============================================================================

/// Whether `x` is non-decreasing.
#[inline]
pub fn is_sorted<T: Float>(x: &[T]) -> bool {
    x.windows(2).all(|w| w[0] <= w[1])
}

/// Sort input data by x-coordinates in ascending order.
#[inline]
pub fn sort_by_x<T: Float>(x: &[T], y: &[T]) -> SortedData<T> {
    if is_sorted(x) {
        return SortedData {
            x: x.to_vec(),
            y: y.to_vec(),
        };
    }

    let mut pairs: Vec<(T, T)> = x.iter().copied().zip(y.iter().copied()).collect();

    // Stable: equal x keep their input order
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let (x, y) = pairs.into_iter().unzip();
    SortedData { x, y }
}
