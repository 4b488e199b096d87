//! Error types for dispatch, accumulator and smoothing operations.
//!
//! ## Purpose
//!
//! This module defines every error condition the crate can report, from
//! dispatcher construction and invocation through accumulator setup to
//! LOWESS input and parameter validation.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected counts).
//! * **Classified**: Every variant maps to one [`ErrorKind`] so callers can tell a
//!   wrong kind of value from an out-of-range value or an unsupported type combination.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Type errors**: Unknown data-type tags, empty kernel lists, missing means or offsets.
//! 2. **Range errors**: Arity, signature counts, array bounds, window sizes, parameters.
//! 3. **Resolution errors**: No registered kernel accepts the runtime data types.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Resolution failures never echo internal argument indices.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Classification
// ============================================================================

/// Broad category of a [`NumError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A value of the wrong kind was supplied.
    InvalidType,

    /// A value of the right kind was outside its allowed range.
    InvalidRange,

    /// No registered kernel matches the runtime data types.
    Unresolved,
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for all `numstat` operations.
#[derive(Debug, Clone, PartialEq)]
pub enum NumError {
    /// A dispatcher needs at least one kernel.
    InvalidKernels,

    /// A type tag is not part of the data-type vocabulary.
    UnknownDataType(String),

    /// Kernel data payloads must pair one-to-one with kernels.
    MismatchedData {
        /// Number of data payloads supplied.
        data_len: usize,
        /// Number of kernels registered.
        kernel_count: usize,
    },

    /// The total argument count must be positive.
    InvalidArity(usize),

    /// A dispatcher must operate on at least one array.
    NoArrays,

    /// The flat type-tag list does not cover every kernel signature exactly.
    MismatchedSignatures {
        /// Number of type tags supplied.
        got: usize,
        /// `kernel_count × (nin + nout)`.
        expected: usize,
    },

    /// The argument count does not fit the calling convention for the array count.
    InconsistentArity {
        /// Argument count supplied at construction.
        nargs: usize,
        /// Number of arrays (`nin + nout`).
        arrays: usize,
    },

    /// An invocation supplied fewer arguments than the dispatcher accepts.
    TooFewArguments {
        /// Arguments supplied.
        got: usize,
        /// Arguments expected.
        expected: usize,
    },

    /// An invocation supplied more arguments than the dispatcher accepts.
    TooManyArguments {
        /// Arguments supplied.
        got: usize,
        /// Arguments expected.
        expected: usize,
    },

    /// An array argument lacks the offset required by the offset convention.
    MissingOffset {
        /// Position of the array among the call's arrays.
        index: usize,
    },

    /// An array argument carries an offset the strided convention does not accept.
    UnexpectedOffset {
        /// Position of the array among the call's arrays.
        index: usize,
    },

    /// An input array is too short for its stride, offset and length.
    InputOutOfBounds {
        /// Position of the array among the call's arrays.
        index: usize,
        /// First offending buffer index.
        accessed: isize,
        /// Buffer length.
        len: usize,
    },

    /// An output array is too short for its stride, offset and length.
    OutputOutOfBounds {
        /// Position of the array among the call's arrays.
        index: usize,
        /// First offending buffer index.
        accessed: isize,
        /// Buffer length.
        len: usize,
    },

    /// An ndarray's strides do not match its dimensionality.
    ShapeMismatch {
        /// Position of the array among the call's arrays.
        index: usize,
        /// Number of dimensions in the shape.
        ndims: usize,
        /// Number of strides supplied.
        nstrides: usize,
    },

    /// No registered kernel accepts the runtime data types.
    Unresolved,

    /// Window capacity must be a positive integer.
    InvalidWindow(usize),

    /// Known-mean mode needs both means.
    MissingMean {
        /// Name of the mean that was not supplied.
        missing: &'static str,
    },

    /// `x` and `y` arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the `x` array.
        x_len: usize,
        /// Number of elements in the `y` array.
        y_len: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Smoothing fraction must be positive and finite.
    InvalidFraction(f64),

    /// Delta controls interpolation skipping and must be non-negative.
    InvalidDelta(f64),

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl NumError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidKernels
            | Self::UnknownDataType(_)
            | Self::MissingOffset { .. }
            | Self::UnexpectedOffset { .. }
            | Self::MissingMean { .. }
            | Self::InvalidNumericValue(_) => ErrorKind::InvalidType,
            Self::Unresolved => ErrorKind::Unresolved,
            _ => ErrorKind::InvalidRange,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for NumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidKernels => {
                write!(f, "Invalid kernels: expected a nonempty list of kernel functions")
            }
            Self::UnknownDataType(tag) => write!(f, "Unknown data type: '{tag}'"),
            Self::MismatchedData {
                data_len,
                kernel_count,
            } => {
                write!(
                    f,
                    "Invalid data: got {data_len} payloads, need one per kernel ({kernel_count})"
                )
            }
            Self::InvalidArity(nargs) => {
                write!(f, "Invalid argument count: {nargs} (must be a positive integer)")
            }
            Self::NoArrays => write!(f, "Invalid arity: nin + nout must be at least 1"),
            Self::MismatchedSignatures { got, expected } => {
                write!(
                    f,
                    "Invalid types: got {got} type tags, expected {expected} (kernels × arrays)"
                )
            }
            Self::InconsistentArity { nargs, arrays } => {
                write!(
                    f,
                    "Invalid argument count: {nargs} is inconsistent with {arrays} array arguments"
                )
            }
            Self::TooFewArguments { got, expected } => {
                write!(f, "Too few arguments: got {got}, expected {expected}")
            }
            Self::TooManyArguments { got, expected } => {
                write!(f, "Too many arguments: got {got}, expected {expected}")
            }
            Self::MissingOffset { index } => {
                write!(f, "Array argument {index} must provide an index offset")
            }
            Self::UnexpectedOffset { index } => {
                write!(f, "Array argument {index} must not provide an index offset")
            }
            Self::InputOutOfBounds {
                index,
                accessed,
                len,
            } => {
                write!(
                    f,
                    "Input array {index} out of bounds: accesses index {accessed} of a buffer of length {len}"
                )
            }
            Self::OutputOutOfBounds {
                index,
                accessed,
                len,
            } => {
                write!(
                    f,
                    "Output array {index} out of bounds: accesses index {accessed} of a buffer of length {len}"
                )
            }
            Self::ShapeMismatch {
                index,
                ndims,
                nstrides,
            } => {
                write!(
                    f,
                    "Array argument {index} has {ndims} dimensions but {nstrides} strides"
                )
            }
            Self::Unresolved => {
                write!(f, "Unable to resolve a kernel for the provided array data types")
            }
            Self::InvalidWindow(w) => {
                write!(f, "Invalid window: {w} (must be a positive integer)")
            }
            Self::MissingMean { missing } => {
                write!(f, "Missing mean: {missing} must be provided with the other mean")
            }
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidFraction(frac) => {
                write!(f, "Invalid fraction: {frac} (must be > 0 and finite)")
            }
            Self::InvalidDelta(delta) => write!(f, "Invalid delta: {delta} (must be >= 0)"),
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for NumError {}
