//! Data-type tags for strided buffers.
//!
//! ## Purpose
//!
//! This module defines the closed vocabulary of element types the dispatcher
//! resolves kernels against, and the introspection that maps a Rust element
//! type to its tag.
//!
//! ## Design notes
//!
//! * **Closed set**: Tags are an enum, not free-form strings; parsing is the only
//!   place strings are accepted.
//! * **Fallback**: Element types outside the numeric vocabulary report `Generic`.
//!
//! ## Key concepts
//!
//! * **Clamped bytes**: `uint8c` has no native Rust counterpart, so [`Uint8c`]
//!   carries it as a transparent newtype over `u8`.
//! * **Complex**: `complex128` and `complex64` are `num_complex::Complex<f64>` and
//!   `Complex<f32>`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;

// External dependencies
use core::any::TypeId;
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;
use num_complex::Complex;

// Internal dependencies
use crate::primitives::errors::NumError;

// ============================================================================
// Data Type Tag
// ============================================================================

/// Element type of a strided buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// `f64`
    Float64,
    /// `f32`
    Float32,
    /// `i32`
    Int32,
    /// `i16`
    Int16,
    /// `i8`
    Int8,
    /// `u32`
    Uint32,
    /// `u16`
    Uint16,
    /// `u8`
    Uint8,
    /// [`Uint8c`]
    Uint8c,
    /// `Complex<f64>`
    Complex128,
    /// `Complex<f32>`
    Complex64,
    /// Anything else.
    Generic,
}

impl DataType {
    /// Every tag, in vocabulary order.
    pub const ALL: [DataType; 12] = [
        Self::Float64,
        Self::Float32,
        Self::Int32,
        Self::Int16,
        Self::Int8,
        Self::Uint32,
        Self::Uint16,
        Self::Uint8,
        Self::Uint8c,
        Self::Complex128,
        Self::Complex64,
        Self::Generic,
    ];

    /// Tag for the element type `T`.
    pub fn of<T: 'static>() -> Self {
        let id = TypeId::of::<T>();
        if id == TypeId::of::<f64>() {
            Self::Float64
        } else if id == TypeId::of::<f32>() {
            Self::Float32
        } else if id == TypeId::of::<i32>() {
            Self::Int32
        } else if id == TypeId::of::<i16>() {
            Self::Int16
        } else if id == TypeId::of::<i8>() {
            Self::Int8
        } else if id == TypeId::of::<u32>() {
            Self::Uint32
        } else if id == TypeId::of::<u16>() {
            Self::Uint16
        } else if id == TypeId::of::<u8>() {
            Self::Uint8
        } else if id == TypeId::of::<Uint8c>() {
            Self::Uint8c
        } else if id == TypeId::of::<Complex<f64>>() {
            Self::Complex128
        } else if id == TypeId::of::<Complex<f32>>() {
            Self::Complex64
        } else {
            Self::Generic
        }
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float64 => "float64",
            Self::Float32 => "float32",
            Self::Int32 => "int32",
            Self::Int16 => "int16",
            Self::Int8 => "int8",
            Self::Uint32 => "uint32",
            Self::Uint16 => "uint16",
            Self::Uint8 => "uint8",
            Self::Uint8c => "uint8c",
            Self::Complex128 => "complex128",
            Self::Complex64 => "complex64",
            Self::Generic => "generic",
        }
    }

    /// Whether the tag names a numeric element type.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Generic)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|dt| dt.as_str() == s)
            .ok_or_else(|| NumError::UnknownDataType(String::from(s)))
    }
}

// ============================================================================
// Clamped Byte
// ============================================================================

/// Unsigned byte whose conversions saturate into `[0, 255]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Uint8c(pub u8);

impl Uint8c {
    /// Clamp and round a float into the byte range. NaN maps to 0.
    pub fn from_f64(v: f64) -> Self {
        if v.is_nan() || v <= 0.0 {
            Self(0)
        } else if v >= 255.0 {
            Self(255)
        } else {
            // Round half to even.
            let floor = v as u8;
            let frac = v - floor as f64;
            let up = frac > 0.5 || (frac == 0.5 && floor % 2 == 1);
            Self(if up { floor + 1 } else { floor })
        }
    }
}

impl From<u8> for Uint8c {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

impl From<Uint8c> for u8 {
    fn from(v: Uint8c) -> Self {
        v.0
    }
}
