//! Online adapter for moving covariance and correlation.
//!
//! ## Purpose
//!
//! This module provides push-based accumulators over the last `W` pairs of a
//! stream. Each push returns the statistic for the current window in O(1)
//! time, and the latest value can be queried at any time without pushing.
//!
//! ## Design notes
//!
//! * **Shared state**: Both accumulators wrap a sliding co-moment state and
//!   only differ in how they normalize it.
//! * **Centering**: Means are either estimated from the window (divisor
//!   `count - 1`) or supplied up front (divisor `count`).
//! * **Validation**: Window and means are checked once, at construction.
//!
//! ## Invariants
//!
//! * A freshly constructed accumulator has no value.
//! * With estimated means, a window holding a single pair has covariance 0.
//! * A NaN pushed into the window yields NaN until it is evicted.
//!
//! ## Non-goals
//!
//! * This adapter does not batch-process arrays.
//! * This adapter does not weight pairs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::comoment::{Centering, SlidingComoment};
use crate::engine::validator::Validator;
use crate::primitives::errors::NumError;

// ============================================================================
// Moving Covariance
// ============================================================================

/// Covariance over a sliding window of `(x, y)` pairs.
#[derive(Debug, Clone)]
pub struct MovingCovariance<T> {
    state: SlidingComoment<T>,
}

impl<T: Float> MovingCovariance<T> {
    /// Accumulator estimating both means from the window.
    pub fn new(window: usize) -> Result<Self, NumError> {
        Self::from_options(window, None, None)
    }

    /// Accumulator with known means.
    pub fn with_means(window: usize, mean_x: T, mean_y: T) -> Result<Self, NumError> {
        Self::from_options(window, Some(mean_x), Some(mean_y))
    }

    /// Accumulator from optional means; both or neither must be given.
    pub fn from_options(
        window: usize,
        mean_x: Option<T>,
        mean_y: Option<T>,
    ) -> Result<Self, NumError> {
        Ok(Self {
            state: new_state(window, mean_x, mean_y)?,
        })
    }

    /// Add a pair and return the updated covariance.
    pub fn push(&mut self, x: T, y: T) -> T {
        self.state.push(x, y);
        self.value().unwrap_or_else(T::nan)
    }

    /// Current covariance, or `None` if nothing has been pushed.
    pub fn value(&self) -> Option<T> {
        let d = self.state.divisor()?;
        let c = self.state.comoment();
        if d == T::zero() {
            return Some(if c.is_nan() { c } else { T::zero() });
        }
        Some(c / d)
    }

    /// Window capacity.
    pub fn window(&self) -> usize {
        self.state.window()
    }

    /// Pairs currently in the window.
    pub fn len(&self) -> usize {
        self.state.count()
    }

    /// Whether nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.state.count() == 0
    }

    /// Whether the window has been filled.
    pub fn is_full(&self) -> bool {
        self.state.is_full()
    }

    /// Means used for centering.
    pub fn means(&self) -> (T, T) {
        self.state.means()
    }
}

// ============================================================================
// Moving Correlation
// ============================================================================

/// Pearson correlation over a sliding window of `(x, y)` pairs.
#[derive(Debug, Clone)]
pub struct MovingCorrelation<T> {
    state: SlidingComoment<T>,
}

impl<T: Float> MovingCorrelation<T> {
    /// Accumulator estimating both means from the window.
    pub fn new(window: usize) -> Result<Self, NumError> {
        Self::from_options(window, None, None)
    }

    /// Accumulator with known means.
    pub fn with_means(window: usize, mean_x: T, mean_y: T) -> Result<Self, NumError> {
        Self::from_options(window, Some(mean_x), Some(mean_y))
    }

    /// Accumulator from optional means; both or neither must be given.
    pub fn from_options(
        window: usize,
        mean_x: Option<T>,
        mean_y: Option<T>,
    ) -> Result<Self, NumError> {
        Ok(Self {
            state: new_state(window, mean_x, mean_y)?,
        })
    }

    /// Add a pair and return the updated correlation.
    pub fn push(&mut self, x: T, y: T) -> T {
        self.state.push(x, y);
        self.value().unwrap_or_else(T::nan)
    }

    /// Current correlation, or `None` if nothing has been pushed.
    ///
    /// A window with zero variance in either series has no defined
    /// correlation and yields NaN or an infinity.
    pub fn value(&self) -> Option<T> {
        let d = self.state.divisor()?;
        let c = self.state.comoment();
        if d == T::zero() {
            return Some(if c.is_nan() { c } else { T::zero() });
        }
        let sx = (self.state.m2x() / d).sqrt();
        let sy = (self.state.m2y() / d).sqrt();
        Some((c / d) / (sx * sy))
    }

    /// Window capacity.
    pub fn window(&self) -> usize {
        self.state.window()
    }

    /// Pairs currently in the window.
    pub fn len(&self) -> usize {
        self.state.count()
    }

    /// Whether nothing has been pushed.
    pub fn is_empty(&self) -> bool {
        self.state.count() == 0
    }

    /// Whether the window has been filled.
    pub fn is_full(&self) -> bool {
        self.state.is_full()
    }
}

fn new_state<T: Float>(
    window: usize,
    mean_x: Option<T>,
    mean_y: Option<T>,
) -> Result<SlidingComoment<T>, NumError> {
    Validator::validate_window(window)?;
    Validator::validate_means(&mean_x, &mean_y)?;

    let centering = match (mean_x, mean_y) {
        (Some(mean_x), Some(mean_y)) => Centering::Known { mean_x, mean_y },
        _ => Centering::Sample,
    };
    Ok(SlidingComoment::new(window, centering))
}
