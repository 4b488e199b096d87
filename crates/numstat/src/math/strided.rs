//! Index arithmetic for strided and n-dimensional array views.
//!
//! ## Purpose
//!
//! This module computes the buffer indices a strided view touches, so the
//! dispatcher can reject out-of-range views before any kernel runs.
//!
//! ## Key concepts
//!
//! * **Strided view**: element `k` lives at `offset + k * stride`.
//! * **N-d view**: element `(i_0, ..., i_{d-1})` lives at `offset + Σ i_d * stride_d`.
//!
//! ## Invariants
//!
//! * Bounds are inclusive `(min, max)` buffer indices; empty views have none.
//! * Index arithmetic is checked. A view whose indices do not fit in `isize`
//!   is reported as [`Extent::Overflow`] and never fits a buffer.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// ============================================================================
// Strided Views
// ============================================================================

/// Largest index touched by `n` elements at `stride` when traversal starts at
/// the end that keeps every index non-negative.
#[inline]
pub fn max_strided_index(n: usize, stride: isize) -> usize {
    n.saturating_sub(1).saturating_mul(stride.unsigned_abs())
}

/// Offset at which a strided traversal of `n` elements starts when no offset
/// is given: `0` for non-negative strides, `(n - 1) * |stride|` for negative ones.
#[inline]
pub fn implied_offset(n: usize, stride: isize) -> usize {
    if stride < 0 {
        max_strided_index(n, stride)
    } else {
        0
    }
}

/// Inclusive `(first, last)` indices touched by `n` elements from `offset`.
pub fn strided_endpoints(n: usize, stride: isize, offset: usize) -> Extent {
    if n == 0 {
        return Extent::Empty;
    }
    let Ok(first) = isize::try_from(offset) else {
        return Extent::Overflow;
    };
    match span(n, stride).and_then(|s| first.checked_add(s)) {
        Some(last) => Extent::Bounds(first, last),
        None => Extent::Overflow,
    }
}

// ============================================================================
// Extents
// ============================================================================

/// Buffer indices covered by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extent {
    /// The view touches no elements.
    Empty,

    /// Inclusive pair of indices; for strided views `(first, last)` in
    /// traversal order, for n-d views `(min, max)`.
    Bounds(isize, isize),

    /// Some index does not fit in `isize`.
    Overflow,
}

impl Extent {
    /// First index that falls outside a buffer of `len` elements.
    ///
    /// Overflowing views report `isize::MAX`.
    pub fn first_outside(self, len: usize) -> Option<isize> {
        match self {
            Self::Empty => None,
            Self::Bounds(a, b) => [a, b]
                .into_iter()
                .find(|&i| usize::try_from(i).map_or(true, |i| i >= len)),
            Self::Overflow => Some(isize::MAX),
        }
    }
}

/// Signed distance `(n - 1) * stride` between the first and last element,
/// or `None` on overflow.
#[inline]
fn span(n: usize, stride: isize) -> Option<isize> {
    if stride == 0 {
        return Some(0);
    }
    isize::try_from(n - 1).ok()?.checked_mul(stride)
}

// ============================================================================
// N-Dimensional Views
// ============================================================================

/// Smallest and largest indices touched by an n-d view.
pub fn nd_bounds(shape: &[usize], strides: &[isize], offset: usize) -> Extent {
    if shape.iter().any(|&d| d == 0) {
        return Extent::Empty;
    }
    let Ok(start) = isize::try_from(offset) else {
        return Extent::Overflow;
    };
    let (mut min, mut max) = (start, start);
    for (&dim, &stride) in shape.iter().zip(strides) {
        let bound = match span(dim, stride) {
            Some(s) if s > 0 => max.checked_add(s).map(|v| max = v),
            Some(s) => min.checked_add(s).map(|v| min = v),
            None => None,
        };
        if bound.is_none() {
            return Extent::Overflow;
        }
    }
    Extent::Bounds(min, max)
}

/// Buffer index of the element at `subscripts`.
#[inline]
pub fn nd_index(subscripts: &[usize], strides: &[isize], offset: usize) -> isize {
    subscripts
        .iter()
        .zip(strides)
        .fold(offset as isize, |acc, (&i, &s)| acc + i as isize * s)
}

/// Number of elements in an n-d view.
#[inline]
pub fn numel(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Contiguous strides for `shape` with the last dimension varying fastest.
pub fn row_major_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = vec![0isize; shape.len()];
    let mut acc = 1isize;
    for (s, &d) in strides.iter_mut().zip(shape).rev() {
        *s = acc;
        acc = acc.saturating_mul(isize::try_from(d.max(1)).unwrap_or(isize::MAX));
    }
    strides
}

/// Contiguous strides for `shape` with the first dimension varying fastest.
pub fn column_major_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = vec![0isize; shape.len()];
    let mut acc = 1isize;
    for (s, &d) in strides.iter_mut().zip(shape) {
        *s = acc;
        acc = acc.saturating_mul(isize::try_from(d.max(1)).unwrap_or(isize::MAX));
    }
    strides
}
