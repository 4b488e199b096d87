//! Windowing primitives for LOWESS smoothing.
//!
//! This module provides the neighborhood window that slides across sorted `x`
//! so each local regression sees the `span` nearest points.

// External dependencies
use num_traits::Float;

// Inclusive window bounds `[left, right]` for a local fit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Window {
    // Left boundary index (inclusive).
    pub left: usize,

    // Right boundary index (inclusive).
    pub right: usize,
}

impl Window {
    // Leftmost window of `span` points.
    #[inline]
    pub fn initialize(span: usize) -> Self {
        debug_assert!(span >= 1, "initialize: span must be at least 1");
        Self {
            left: 0,
            right: span - 1,
        }
    }

    // Slide right while that strictly tightens the neighborhood of `x[current]`.
    //
    // Ties do not move the window.
    #[inline]
    pub fn advance<T: Float>(&mut self, x: &[T], current: usize) {
        let n = x.len();
        let x_current = x[current];

        while self.right + 1 < n {
            let d_left = x_current - x[self.left];
            let d_right = x[self.right + 1] - x_current;

            if d_left <= d_right {
                break;
            }

            self.left += 1;
            self.right += 1;
        }
    }

    // Half-width of the neighborhood around `x_current`.
    #[inline]
    pub fn max_distance<T: Float>(&self, x: &[T], x_current: T) -> T {
        T::max(x_current - x[self.left], x[self.right] - x_current)
    }

    // Number of points in a neighborhood: `floor(frac * n)` clamped to `[2, n]`.
    #[inline]
    pub fn calculate_span<T: Float>(n: usize, frac: T) -> usize {
        let frac_n = (frac * T::from(n).unwrap_or_else(T::zero)).floor();
        let frac_n_int = frac_n.to_usize().unwrap_or(usize::MAX);
        usize::max(2, usize::min(n, frac_n_int))
    }

    // Number of points in the window.
    #[inline]
    pub fn len(&self) -> usize {
        self.right - self.left + 1
    }
}
