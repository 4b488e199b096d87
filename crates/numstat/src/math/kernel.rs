//! Kernel (weight) functions for LOWESS smoothing.
//!
//! ## Purpose
//!
//! This module provides the two weight functions the smoother uses: the
//! tricube distance kernel for local regression and the bisquare residual
//! kernel for robustness iterations.
//!
//! ## Design notes
//!
//! * **Thresholded**: Both kernels snap to exactly 1 near zero and exactly 0 near
//!   the edge of their support (`0.001` and `0.999` of the scale), matching the
//!   classic Fortran LOWESS.
//! * **Generics**: Weights are generic over `Float` types.
//!
//! ## Invariants
//!
//! * Weights are in `[0, 1]` for non-negative distances and positive scales.
//!
//! ## Non-goals
//!
//! * This module does not perform weight normalization.
//! * This module does not choose bandwidths.

// External dependencies
use num_traits::Float;

// ============================================================================
// Thresholds
// ============================================================================

/// Fraction of the scale below which a weight is exactly one.
pub const LOWER_CUTOFF: f64 = 0.001;

/// Fraction of the scale above which a weight is exactly zero.
pub const UPPER_CUTOFF: f64 = 0.999;

/// `(lower, upper)` cutoffs for `scale`.
#[inline]
pub fn cutoffs<T: Float>(scale: T) -> (T, T) {
    let lo = T::from(LOWER_CUTOFF).unwrap_or_else(T::zero);
    let hi = T::from(UPPER_CUTOFF).unwrap_or_else(T::one);
    (lo * scale, hi * scale)
}

// ============================================================================
// Weight Functions
// ============================================================================

/// Tricube `(1 - u^3)^3` for `u = r / h`, without thresholds.
#[inline]
pub fn tricube<T: Float>(u: T) -> T {
    let abs_u = u.abs();
    if abs_u >= T::one() {
        return T::zero();
    }
    let tmp = T::one() - abs_u * abs_u * abs_u;
    tmp * tmp * tmp
}

/// Bisquare `(1 - u^2)^2` for `u = r / c`, without thresholds.
#[inline]
pub fn bisquare<T: Float>(u: T) -> T {
    let abs_u = u.abs();
    if abs_u >= T::one() {
        return T::zero();
    }
    let tmp = T::one() - abs_u * abs_u;
    tmp * tmp
}

/// Thresholded tricube weight of a point at distance `r` from the query,
/// within a neighborhood of half-width `h`.
#[inline]
pub fn distance_weight<T: Float>(r: T, h: T) -> T {
    let (h1, h9) = cutoffs(h);
    if r <= h1 {
        T::one()
    } else if r > h9 {
        T::zero()
    } else {
        tricube(r / h)
    }
}

/// Thresholded bisquare weight of a residual of magnitude `r` against scale `cmad`.
#[inline]
pub fn residual_weight<T: Float>(r: T, cmad: T) -> T {
    let (c1, c9) = cutoffs(cmad);
    if r <= c1 {
        T::one()
    } else if r > c9 {
        T::zero()
    } else {
        bisquare(r / cmad)
    }
}
