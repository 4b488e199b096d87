//! Buffers: type-erased strided storage, the paired ring and LOWESS scratch space.
//!
//! ## Purpose
//!
//! This module provides the storage abstractions the rest of the crate works
//! on: the [`StridedBuffer`] trait the dispatcher accepts, the fixed-capacity
//! interleaved ring the moving accumulators keep their window in, and the
//! reusable workspace the LOWESS executor fills each pass.
//!
//! ## Design notes
//!
//! * **Type erasure**: Dispatch happens on runtime data types, so arrays cross the
//!   dispatcher as `&mut dyn StridedBuffer` and kernels downcast back to slices.
//! * **Fixed ring**: The paired ring allocates `2W` slots once and never grows.
//! * **Recycling**: `LowessBuffer` slots are resized in place and reused across passes.
//!
//! ## Key concepts
//!
//! * **StridedBuffer**: Any `Vec<T>` or `Box<[T]>` with a `'static` element type.
//! * **PairRing**: Interleaved `(x, y)` circular storage with a write cursor.
//! * **Slot**: A reusable vector wrapper with automatic capacity management.
//! * **LowessBuffer**: Working memory for the LOWESS executor.
//!
//! ## Invariants
//!
//! * `PairRing` holds exactly `2 × window` values for its whole lifetime.
//! * The ring cursor is always in `[0, window)` once the first pair is written.
//!
//! ## Non-goals
//!
//! * Views over borrowed slices; the dispatcher works on owned storage, since
//!   downcasting needs a `'static` buffer type.
//! * Dynamic shrinking or aggressive memory reclamation.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::any::Any;
use core::ops::{Deref, DerefMut};
use num_traits::{One, Zero};

// Internal dependencies
use crate::primitives::dtype::DataType;

// ============================================================================
// StridedBuffer - Type-Erased Array Storage
// ============================================================================

/// Indexable, length-bearing storage with a runtime data-type tag.
pub trait StridedBuffer {
    /// Number of elements in the buffer.
    fn len(&self) -> usize;

    /// Whether the buffer holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runtime element type tag.
    fn data_type(&self) -> DataType;

    /// Upcast for downcasting to the concrete buffer.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete buffer.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> StridedBuffer for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn data_type(&self) -> DataType {
        DataType::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl<T: 'static> StridedBuffer for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn data_type(&self) -> DataType {
        DataType::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Typed access to a [`StridedBuffer`].
pub trait BufferExt {
    /// Borrow the elements as `&[T]` if the buffer holds `T`.
    fn downcast_slice<T: 'static>(&self) -> Option<&[T]>;

    /// Borrow the elements as `&mut [T]` if the buffer holds `T`.
    fn downcast_slice_mut<T: 'static>(&mut self) -> Option<&mut [T]>;
}

impl<B: StridedBuffer + ?Sized> BufferExt for B {
    #[inline]
    fn downcast_slice<T: 'static>(&self) -> Option<&[T]> {
        let any = self.as_any();
        match any.downcast_ref::<Vec<T>>() {
            Some(v) => Some(v.as_slice()),
            None => any.downcast_ref::<Box<[T]>>().map(|b| &**b),
        }
    }

    #[inline]
    fn downcast_slice_mut<T: 'static>(&mut self) -> Option<&mut [T]> {
        let any = self.as_any_mut();
        if any.is::<Vec<T>>() {
            any.downcast_mut::<Vec<T>>().map(Vec::as_mut_slice)
        } else {
            any.downcast_mut::<Box<[T]>>().map(|b| &mut **b)
        }
    }
}

// ============================================================================
// PairRing - Interleaved Circular Storage
// ============================================================================

/// Fixed-capacity circular buffer of interleaved `(x, y)` pairs.
#[derive(Debug, Clone)]
pub struct PairRing<T> {
    data: Vec<T>,
    window: usize,
    cursor: Option<usize>,
}

impl<T: Copy + Zero> PairRing<T> {
    /// Allocate a zero-filled ring holding `window` pairs.
    pub fn new(window: usize) -> Self {
        Self {
            data: vec![T::zero(); 2 * window],
            window,
            cursor: None,
        }
    }

    /// Number of pairs the ring holds.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Move the cursor to the next slot and return it.
    #[inline]
    pub fn advance(&mut self) -> usize {
        let next = match self.cursor {
            Some(c) => (c + 1) % self.window,
            None => 0,
        };
        self.cursor = Some(next);
        next
    }

    /// Pair stored at `slot`.
    #[inline]
    pub fn get(&self, slot: usize) -> (T, T) {
        (self.data[2 * slot], self.data[2 * slot + 1])
    }

    /// Overwrite the pair at `slot`.
    #[inline]
    pub fn set(&mut self, slot: usize, x: T, y: T) {
        self.data[2 * slot] = x;
        self.data[2 * slot + 1] = y;
    }
}

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Create a new slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Resize to `n` and fill with `val`, reusing capacity.
    pub fn assign(&mut self, n: usize, val: T)
    where
        T: Clone,
    {
        if self.0.len() != n {
            self.0.clear();
            self.0.resize(n, val);
        } else {
            self.0.fill(val);
        }
    }

    /// Move the contents out, leaving an empty slot.
    pub fn take(&mut self) -> Vec<T> {
        core::mem::take(&mut self.0)
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

// ============================================================================
// LowessBuffer - Working Memory for LOWESS Executor
// ============================================================================

/// Working memory for the LOWESS executor.
///
/// Holds the fitted values, residuals, robustness weights and kernel weights
/// shared by every pass over the data.
#[derive(Debug, Clone)]
pub struct LowessBuffer<T> {
    /// Current fitted y-values.
    pub fitted: Slot<T>,

    /// Residuals buffer (y - fitted).
    pub residuals: Slot<T>,

    /// Robustness weights (updated between passes).
    pub robustness_weights: Slot<T>,

    /// Kernel weights scratch buffer.
    pub weights: Slot<T>,
}

impl<T> Default for LowessBuffer<T> {
    fn default() -> Self {
        Self {
            fitted: Slot::default(),
            residuals: Slot::default(),
            robustness_weights: Slot::default(),
            weights: Slot::default(),
        }
    }
}

impl<T: Clone + Zero + One> LowessBuffer<T> {
    /// Create a buffer pre-allocated for `n` data points.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            fitted: Slot::new(n),
            residuals: Slot::new(n),
            robustness_weights: Slot::new(n),
            weights: Slot::new(n),
        }
    }

    /// Prepare buffers for a dataset of size `n`.
    pub fn prepare(&mut self, n: usize) {
        self.fitted.assign(n, T::zero());
        self.residuals.assign(n, T::zero());
        self.robustness_weights.assign(n, T::one());
        self.weights.assign(n, T::zero());
    }
}
