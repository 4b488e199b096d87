//! Batch adapter for LOWESS smoothing.
//!
//! ## Purpose
//!
//! This module provides the batch execution adapter: it validates a complete
//! in-memory dataset, sorts it by x unless told it is already sorted, runs
//! the executor, and packages the sorted x-values with their fits.
//!
//! ## Design notes
//!
//! * **Processing**: Processes entire dataset in a single call.
//! * **Sorting**: Copies and stably sorts by x when `sorted` is false.
//! * **Delegation**: Delegates computation to the execution engine.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Input arrays x and y must have the same length.
//! * All values must be finite.
//! * Output is in ascending x order.
//! * Fewer than two points are returned unsmoothed.
//!
//! ## Non-goals
//!
//! * This adapter does not restore the caller's input order.
//! * This adapter does not handle missing values.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::interpolation::default_delta;
use crate::engine::executor::LowessExecutor;
use crate::engine::output::LowessResult;
use crate::engine::validator::Validator;
use crate::primitives::buffer::LowessBuffer;
use crate::primitives::errors::NumError;
use crate::primitives::sorting::{sort_by_x, SortedData};

// ============================================================================
// Batch LOWESS Builder
// ============================================================================

/// Builder for batch LOWESS processor.
#[derive(Debug, Clone)]
pub struct BatchLowessBuilder<T> {
    /// Smoothing fraction (span).
    pub fraction: T,

    /// Number of robustness iterations.
    pub iterations: usize,

    /// Merge distance; `None` means one percent of the x-range.
    pub delta: Option<T>,

    /// Whether the caller guarantees ascending x.
    pub sorted: bool,

    /// Whether to return residuals.
    pub return_residuals: bool,

    /// Whether to return the final robustness weights.
    pub return_robustness_weights: bool,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchLowessBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchLowessBuilder<T> {
    /// Create a new builder with default parameters.
    fn new() -> Self {
        Self {
            fraction: LowessExecutor::<T>::new().fraction,
            iterations: 3,
            delta: None,
            sorted: false,
            return_residuals: false,
            return_robustness_weights: false,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the smoothing fraction.
    pub fn fraction(mut self, fraction: T) -> Self {
        self.fraction = fraction;
        self
    }

    /// Set the number of robustness iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the merge distance.
    pub fn delta(mut self, delta: T) -> Self {
        self.delta = Some(delta);
        self
    }

    /// Declare the input already sorted by x.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Include residuals in output.
    pub fn return_residuals(mut self) -> Self {
        self.return_residuals = true;
        self
    }

    /// Include final robustness weights in output.
    pub fn return_robustness_weights(mut self) -> Self {
        self.return_robustness_weights = true;
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch processor.
    pub fn build(self) -> Result<BatchLowess<T>, NumError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Validator::validate_fraction(self.fraction)?;

        if let Some(delta) = self.delta {
            Validator::validate_delta(delta)?;
        }

        Ok(BatchLowess { config: self })
    }
}

// ============================================================================
// Batch LOWESS Processor
// ============================================================================

/// Batch LOWESS processor.
#[derive(Debug, Clone)]
pub struct BatchLowess<T> {
    config: BatchLowessBuilder<T>,
}

impl<T: Float> BatchLowess<T> {
    /// Perform LOWESS smoothing on the provided data.
    pub fn fit(&self, x: &[T], y: &[T]) -> Result<LowessResult<T>, NumError> {
        self.fit_with_buffer(x, y, &mut LowessBuffer::default())
    }

    /// Perform LOWESS smoothing, reusing `buffer` for working memory.
    pub fn fit_with_buffer(
        &self,
        x: &[T],
        y: &[T],
        buffer: &mut LowessBuffer<T>,
    ) -> Result<LowessResult<T>, NumError> {
        Validator::validate_inputs(x, y)?;

        let sorted = if self.config.sorted {
            SortedData {
                x: x.to_vec(),
                y: y.to_vec(),
            }
        } else {
            sort_by_x(x, y)
        };
        let delta = self
            .config
            .delta
            .unwrap_or_else(|| default_delta(&sorted.x));

        let n = sorted.x.len();
        if n < 2 {
            return Ok(LowessResult {
                residuals: self.config.return_residuals.then(|| vec![T::zero(); n]),
                robustness_weights: self
                    .config
                    .return_robustness_weights
                    .then(|| vec![T::one(); n]),
                x: sorted.x,
                y: sorted.y,
                iterations_used: 0,
                fraction_used: self.config.fraction,
                delta_used: delta,
            });
        }

        let executor = LowessExecutor::new()
            .fraction(self.config.fraction)
            .iterations(self.config.iterations)
            .delta(delta);
        let result = executor.run(&sorted.x, &sorted.y, Some(buffer));

        let residuals: Option<Vec<T>> = self.config.return_residuals.then_some(result.residuals);
        let robustness_weights = self
            .config
            .return_robustness_weights
            .then_some(result.robustness_weights);

        Ok(LowessResult {
            x: sorted.x,
            y: result.smoothed,
            residuals,
            robustness_weights,
            iterations_used: result.iterations,
            fraction_used: self.config.fraction,
            delta_used: delta,
        })
    }
}
