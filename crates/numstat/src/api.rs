//! High-level API for dispatch, moving statistics and LOWESS smoothing.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points. LOWESS is configured
//! through a fluent builder that hands its parameters to an execution
//! adapter; dispatchers and accumulators are re-exported as they are.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Core parameters are validated during adapter construction.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`LowessBuilder`] via `Lowess::new()`.
//! 2. Chain configuration methods (`.fraction()`, `.iterations()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Batch)` to get an execution builder.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::batch::BatchLowessBuilder;

// Publicly re-exported types
pub use crate::adapters::batch::BatchLowess;
pub use crate::adapters::online::{MovingCorrelation, MovingCovariance};
pub use crate::dispatch::ndarray::{NdArray, NdDispatched, NdDispatcher, NdFn, Order};
pub use crate::dispatch::strided::{
    Dispatched, StridedArg, StridedDispatcher, StridedDispatcherBuilder, StridedFn,
};
pub use crate::engine::output::LowessResult;
pub use crate::math::strided::implied_offset;
pub use crate::primitives::buffer::{BufferExt, StridedBuffer};
pub use crate::primitives::dtype::{DataType, Uint8c};
pub use crate::primitives::errors::{ErrorKind, NumError};

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::Batch;
}

/// Fluent builder for configuring LOWESS parameters.
#[derive(Debug, Clone)]
pub struct LowessBuilder<T> {
    /// Smoothing fraction.
    pub fraction: Option<T>,

    /// Robustness iterations.
    pub iterations: Option<usize>,

    /// Threshold for skipping fitting (delta-optimization).
    pub delta: Option<T>,

    /// Whether the input is already sorted by x.
    pub sorted: Option<bool>,

    /// Return residuals r_i.
    pub compute_residuals: Option<bool>,

    /// Return final robustness weights w_i.
    pub return_robustness_weights: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for LowessBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> LowessBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: LowessAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            fraction: None,
            iterations: None,
            delta: None,
            sorted: None,
            compute_residuals: None,
            return_robustness_weights: None,
            duplicate_param: None,
        }
    }

    /// Set the smoothing fraction (bandwidth alpha).
    pub fn fraction(mut self, fraction: T) -> Self {
        if self.fraction.is_some() {
            self.duplicate_param = Some("fraction");
        }
        self.fraction = Some(fraction);
        self
    }

    /// Set the number of robustness iterations (typically 0-4).
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Set the delta parameter for interpolation-based optimization.
    pub fn delta(mut self, delta: T) -> Self {
        if self.delta.is_some() {
            self.duplicate_param = Some("delta");
        }
        self.delta = Some(delta);
        self
    }

    /// Declare whether x is already in ascending order.
    pub fn sorted(mut self, sorted: bool) -> Self {
        if self.sorted.is_some() {
            self.duplicate_param = Some("sorted");
        }
        self.sorted = Some(sorted);
        self
    }

    /// Include residuals in output.
    pub fn return_residuals(mut self) -> Self {
        self.compute_residuals = Some(true);
        self
    }

    /// Include final robustness weights in output.
    pub fn return_robustness_weights(mut self) -> Self {
        self.return_robustness_weights = Some(true);
        self
    }
}

/// Trait for transitioning from a generic builder to an execution builder.
pub trait LowessAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`LowessBuilder`] into a specialized execution builder.
    fn convert(builder: LowessBuilder<T>) -> Self::Output;
}

/// Marker for in-memory batch processing.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> LowessAdapter<T> for Batch {
    type Output = BatchLowessBuilder<T>;

    fn convert(builder: LowessBuilder<T>) -> Self::Output {
        let mut result = BatchLowessBuilder::default();

        if let Some(fraction) = builder.fraction {
            result.fraction = fraction;
        }
        if let Some(iterations) = builder.iterations {
            result.iterations = iterations;
        }
        if let Some(delta) = builder.delta {
            result.delta = Some(delta);
        }
        if let Some(sorted) = builder.sorted {
            result.sorted = sorted;
        }

        if let Some(cr) = builder.compute_residuals {
            result.return_residuals = cr;
        }
        if let Some(rw) = builder.return_robustness_weights {
            result.return_robustness_weights = rw;
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
