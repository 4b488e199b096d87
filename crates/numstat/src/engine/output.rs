//! Output types and result structures for LOWESS operations.
//!
//! ## Purpose
//!
//! This module defines the `LowessResult` struct which carries the sorted
//! x-values, the fitted values, and any optional per-point outputs the
//! caller requested.
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: All optional outputs use `Option<Vec<T>>`.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//! * **Consistency**: Sorted x-values are stored to maintain correspondence.
//!
//! ## Invariants
//!
//! * All populated vectors have the same length as the input data.
//! * x-values are sorted in non-decreasing order.
//! * Robustness weights are always in the range [0, 1].
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not provide serialization/deserialization logic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Result Structure
// ============================================================================

/// LOWESS output: sorted x-values paired with fitted values.
#[derive(Debug, Clone, PartialEq)]
pub struct LowessResult<T> {
    /// Sorted x-values (independent variable).
    pub x: Vec<T>,

    /// Fitted y-values, `y[i]` corresponding to `x[i]`.
    pub y: Vec<T>,

    /// Residuals from the fit (y_i - y_hat_i).
    pub residuals: Option<Vec<T>>,

    /// Robustness weights applied in the final pass.
    pub robustness_weights: Option<Vec<T>>,

    /// Number of robustness iterations performed.
    pub iterations_used: usize,

    /// Smoothing fraction used for the fit.
    pub fraction_used: T,

    /// Merge distance used for delta-skipping.
    pub delta_used: T,
}

impl<T: Float> LowessResult<T> {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the result holds no points.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Borrow `(x, y)` as slices.
    pub fn as_pair(&self) -> (&[T], &[T]) {
        (&self.x, &self.y)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for LowessResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.x.len())?;
        writeln!(f, "  Fraction:    {}", self.fraction_used)?;
        writeln!(f, "  Delta:       {}", self.delta_used)?;
        writeln!(f, "  Iterations:  {}", self.iterations_used)?;
        writeln!(f)?;

        writeln!(f, "Smoothed Data:")?;

        let has_resid = self.residuals.is_some();
        let has_weights = self.robustness_weights.is_some();

        // Header
        write!(f, "{:>8} {:>12}", "X", "Y_smooth")?;
        if has_resid {
            write!(f, " {:>12}", "Residual")?;
        }
        if has_weights {
            write!(f, " {:>10}", "Rob_Weight")?;
        }
        writeln!(f)?;

        let line_width = 21 + if has_resid { 13 } else { 0 } + if has_weights { 11 } else { 0 };
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Data rows (show first 10 and last 10 if more than 20 points)
        let n = self.x.len();
        let rows_to_show: Vec<usize> = if n <= 20 {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8.2} {:>12.6}", self.x[idx], self.y[idx])?;

            if let Some(resid) = &self.residuals {
                write!(f, " {:>12.6}", resid[idx])?;
            }

            if let Some(weights) = &self.robustness_weights {
                write!(f, " {:>10.4}", weights[idx])?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
