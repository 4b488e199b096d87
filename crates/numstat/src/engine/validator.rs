//! Input validation for smoothing, accumulator and dispatcher configuration.
//!
//! ## Purpose
//!
//! This module provides the validation functions for LOWESS inputs and
//! parameters, accumulator window sizes, and dispatcher construction
//! arguments.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Numeric validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Parameter Bounds**: Enforces constraints like a positive, finite fraction.
//! * **Finite Checks**: Ensures smoothing inputs are finite (no NaN/Inf).
//! * **Calling conventions**: A dispatcher's argument count must be `2k + 1`
//!   (strided) or `3k + 1` (with offsets) for `k` arrays.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::dtype::DataType;
use crate::primitives::errors::NumError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for configuration and input data.
///
/// Provides static methods that return `Result<_, NumError>` and fail fast
/// upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Smoothing Inputs
    // ========================================================================

    /// Validate input arrays for LOWESS smoothing.
    pub fn validate_inputs<T: Float>(x: &[T], y: &[T]) -> Result<(), NumError> {
        // Check 1: Matching lengths
        let n = x.len();
        if n != y.len() {
            return Err(NumError::MismatchedInputs {
                x_len: n,
                y_len: y.len(),
            });
        }

        // Check 2: All values finite (combined loop for cache locality)
        for i in 0..n {
            if !x[i].is_finite() {
                return Err(NumError::InvalidNumericValue(format!(
                    "x[{}]={}",
                    i,
                    x[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
            if !y[i].is_finite() {
                return Err(NumError::InvalidNumericValue(format!(
                    "y[{}]={}",
                    i,
                    y[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the smoothing fraction.
    ///
    /// Fractions above one are accepted; the neighborhood is capped at `n`.
    pub fn validate_fraction<T: Float>(fraction: T) -> Result<(), NumError> {
        if !fraction.is_finite() || fraction <= T::zero() {
            return Err(NumError::InvalidFraction(
                fraction.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the delta (merge distance) parameter.
    pub fn validate_delta<T: Float>(delta: T) -> Result<(), NumError> {
        if !delta.is_finite() || delta < T::zero() {
            return Err(NumError::InvalidDelta(delta.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), NumError> {
        if let Some(param) = duplicate_param {
            return Err(NumError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    // ========================================================================
    // Accumulator Validation
    // ========================================================================

    /// Validate a moving-window capacity.
    pub fn validate_window(window: usize) -> Result<(), NumError> {
        if window == 0 {
            return Err(NumError::InvalidWindow(window));
        }
        Ok(())
    }

    /// Validate that fixed means are supplied together.
    pub fn validate_means<T>(mean_x: &Option<T>, mean_y: &Option<T>) -> Result<(), NumError> {
        match (mean_x, mean_y) {
            (Some(_), None) => Err(NumError::MissingMean { missing: "mean_y" }),
            (None, Some(_)) => Err(NumError::MissingMean { missing: "mean_x" }),
            _ => Ok(()),
        }
    }

    // ========================================================================
    // Dispatcher Validation
    // ========================================================================

    /// Validate that at least one kernel is registered.
    pub fn validate_kernels(kernel_count: usize) -> Result<(), NumError> {
        if kernel_count == 0 {
            return Err(NumError::InvalidKernels);
        }
        Ok(())
    }

    /// Parse every type tag.
    pub fn parse_types<S: AsRef<str>>(types: &[S]) -> Result<Vec<DataType>, NumError> {
        types.iter().map(|t| t.as_ref().parse()).collect()
    }

    /// Validate that data payloads pair one-to-one with kernels.
    pub fn validate_data(data_len: Option<usize>, kernel_count: usize) -> Result<(), NumError> {
        match data_len {
            Some(len) if len != kernel_count => Err(NumError::MismatchedData {
                data_len: len,
                kernel_count,
            }),
            _ => Ok(()),
        }
    }

    /// Validate the argument count and array counts.
    pub fn validate_counts(nargs: usize, nin: usize, nout: usize) -> Result<(), NumError> {
        if nargs == 0 {
            return Err(NumError::InvalidArity(nargs));
        }
        if nin + nout == 0 {
            return Err(NumError::NoArrays);
        }
        Ok(())
    }

    /// Validate that the flat tag list covers `kernel_count` signatures of `arrays` tags.
    pub fn validate_signatures(
        type_count: usize,
        kernel_count: usize,
        arrays: usize,
    ) -> Result<(), NumError> {
        let expected = kernel_count * arrays;
        if type_count != expected {
            return Err(NumError::MismatchedSignatures {
                got: type_count,
                expected,
            });
        }
        Ok(())
    }

    /// Resolve the calling convention from the argument count.
    ///
    /// Returns `true` for the offset convention (`3k + 1`) and `false` for the
    /// strided convention (`2k + 1`).
    pub fn validate_convention(nargs: usize, arrays: usize) -> Result<bool, NumError> {
        if nargs == 2 * arrays + 1 {
            Ok(false)
        } else if nargs == 3 * arrays + 1 {
            Ok(true)
        } else {
            Err(NumError::InconsistentArity { nargs, arrays })
        }
    }

    /// Validate an invocation's argument count.
    pub fn validate_call_arity(got: usize, expected: usize) -> Result<(), NumError> {
        if got < expected {
            return Err(NumError::TooFewArguments { got, expected });
        }
        if got > expected {
            return Err(NumError::TooManyArguments { got, expected });
        }
        Ok(())
    }
}
