//! Execution engine for LOWESS smoothing operations.
//!
//! ## Purpose
//!
//! This module drives the LOWESS passes over sorted data: one plain pass,
//! then `iterations` robustness passes, each sliding a neighborhood window
//! left to right, fitting anchors, skipping and interpolating points within
//! `delta`, and finally recomputing residuals and robustness weights.
//!
//! ## Design notes
//!
//! * Working memory lives in a [`LowessBuffer`] that callers may reuse.
//! * The plain pass ignores robustness weights; later passes multiply them in.
//! * Robustness weights are not recomputed after the last pass.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * Input x-values are sorted ascending and there are at least two points.
//! * All working buffers have the same length as input data.
//! * Robustness weights are always in [0, 1].
//! * Window size is at least 2 and at most n.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not sort input data (caller's responsibility).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::interpolation::{interpolate_gap, skip_within_delta};
use crate::algorithms::regression::fit_point;
use crate::algorithms::robustness::update_robustness_weights;
use crate::primitives::buffer::LowessBuffer;
use crate::primitives::window::Window;

// ============================================================================
// Output
// ============================================================================

/// Output from LOWESS execution.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T> {
    /// Fitted y-values.
    pub smoothed: Vec<T>,

    /// Residuals of the final pass.
    pub residuals: Vec<T>,

    /// Robustness weights applied in the final pass.
    pub robustness_weights: Vec<T>,

    /// Robustness iterations performed.
    pub iterations: usize,
}

// ============================================================================
// Executor
// ============================================================================

/// LOWESS pass driver.
#[derive(Debug, Clone, Copy)]
pub struct LowessExecutor<T> {
    /// Fraction of points in each neighborhood.
    pub fraction: T,

    /// Number of robustness iterations.
    pub iterations: usize,

    /// Merge distance for delta-skipping.
    pub delta: T,
}

impl<T: Float> Default for LowessExecutor<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> LowessExecutor<T> {
    // ========================================================================
    // Constructor and Builder Methods
    // ========================================================================

    /// Create an executor with `fraction = 2/3`, three iterations and `delta = 0`.
    pub fn new() -> Self {
        let two = T::one() + T::one();
        Self {
            fraction: two / (two + T::one()),
            iterations: 3,
            delta: T::zero(),
        }
    }

    /// Set the smoothing fraction.
    pub fn fraction(mut self, frac: T) -> Self {
        self.fraction = frac;
        self
    }

    /// Set the number of robustness iterations.
    pub fn iterations(mut self, niter: usize) -> Self {
        self.iterations = niter;
        self
    }

    /// Set the merge distance.
    pub fn delta(mut self, delta: T) -> Self {
        self.delta = delta;
        self
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Smooth sorted `(x, y)`, reusing `buffer` when given.
    pub fn run(&self, x: &[T], y: &[T], buffer: Option<&mut LowessBuffer<T>>) -> ExecutorOutput<T> {
        let n = x.len();
        let mut local;
        let buffer = match buffer {
            Some(b) => b,
            None => {
                local = LowessBuffer::with_capacity(n);
                &mut local
            }
        };
        buffer.prepare(n);

        let span = Window::calculate_span(n, self.fraction);
        let iterations = self.iteration_loop(x, y, span, buffer);

        ExecutorOutput {
            smoothed: buffer.fitted.take(),
            residuals: buffer.residuals.take(),
            robustness_weights: buffer.robustness_weights.take(),
            iterations,
        }
    }

    /// Plain pass plus robustness passes. Returns the robustness iterations run.
    pub fn iteration_loop(
        &self,
        x: &[T],
        y: &[T],
        span: usize,
        buffer: &mut LowessBuffer<T>,
    ) -> usize {
        let LowessBuffer {
            fitted,
            residuals,
            robustness_weights,
            weights,
        } = buffer;

        for iter in 0..=self.iterations {
            let robustness = if iter > 0 {
                Some(robustness_weights.as_slice())
            } else {
                None
            };
            Self::smooth_pass(
                x,
                y,
                span,
                self.delta,
                robustness,
                &mut fitted[..],
                &mut weights[..],
            );

            for ((r, &yi), &fi) in residuals.iter_mut().zip(y).zip(fitted.iter()) {
                *r = yi - fi;
            }

            if iter == self.iterations {
                break;
            }
            update_robustness_weights(
                &residuals[..],
                &mut weights[..],
                &mut robustness_weights[..],
            );
        }

        self.iterations
    }

    /// One left-to-right pass over the data.
    pub fn smooth_pass(
        x: &[T],
        y: &[T],
        span: usize,
        delta: T,
        robustness_weights: Option<&[T]>,
        fitted: &mut [T],
        weights: &mut [T],
    ) {
        let n = x.len();
        let mut window = Window::initialize(span);
        let mut last: Option<usize> = None;
        let mut i = 0;

        loop {
            window.advance(x, i);

            fitted[i] = fit_point(x, y, x[i], window, robustness_weights, weights).unwrap_or(y[i]);

            if let Some(prev) = last {
                if prev + 1 < i {
                    interpolate_gap(x, fitted, prev, i);
                }
            }

            let (anchor, next) = skip_within_delta(x, fitted, i, delta);
            if anchor >= n - 1 {
                break;
            }
            last = Some(anchor);
            i = next;
        }
    }
}
