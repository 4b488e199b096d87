//! Multiple dispatch over one-dimensional strided kernels.
//!
//! ## Purpose
//!
//! This module builds a [`StridedDispatcher`] from a set of interchangeable
//! kernels and their type signatures. Each call validates the argument
//! count, offsets and array bounds, reads the runtime data type of every
//! array, and invokes the first kernel whose signature matches.
//!
//! ## Design notes
//!
//! * **Validate then resolve**: Shape checks run once, independent of how many
//!   type combinations are registered, and no kernel runs on invalid input.
//! * **Fixed convention**: `nin`, `nout` and the offset convention are captured
//!   at construction, so each call takes `(n, arrays)` and nothing else.
//! * **Return arity**: One output comes back as the caller's own buffer; several
//!   come back as a list of outputs only.
//!
//! ## Key concepts
//!
//! * **Strided convention**: `nargs = 2(nin + nout) + 1`; the kernel infers each
//!   start from the sign of its stride.
//! * **Offset convention**: `nargs = 3(nin + nout) + 1`; every array carries an
//!   explicit start index.
//!
//! ## Invariants
//!
//! * A kernel only ever sees arrays whose every accessed index is in bounds.
//! * Resolution is deterministic: ties go to the earliest registration.
//!
//! ## Non-goals
//!
//! * Type coercion or promotion between data types.
//! * Shipping concrete numeric kernels.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::fmt::{self, Debug, Formatter};

// Internal dependencies
use crate::dispatch::table::KernelTable;
use crate::engine::validator::Validator;
use crate::math::strided::{max_strided_index, strided_endpoints};
use crate::primitives::buffer::StridedBuffer;
use crate::primitives::dtype::DataType;
use crate::primitives::errors::NumError;

// ============================================================================
// Kernel Signature
// ============================================================================

/// Kernel calling convention: `(arrays, shape, strides, offsets, data)`.
///
/// `offsets` is `Some` exactly when the dispatcher uses the offset convention.
pub type StridedFn<D> =
    fn(&mut [&mut dyn StridedBuffer], &[usize], &[isize], Option<&[usize]>, Option<&D>);

// ============================================================================
// Arguments and Results
// ============================================================================

/// One array argument of a strided call.
pub struct StridedArg<'a> {
    /// Backing buffer.
    pub array: &'a mut dyn StridedBuffer,

    /// Step between logical elements; negative traverses in reverse.
    pub stride: isize,

    /// Index of the first logical element (offset convention only).
    pub offset: Option<usize>,
}

impl<'a> StridedArg<'a> {
    /// Array argument for the strided convention.
    pub fn new<B: StridedBuffer + 'a>(array: &'a mut B, stride: isize) -> Self {
        Self {
            array,
            stride,
            offset: None,
        }
    }

    /// Array argument for the offset convention.
    pub fn with_offset<B: StridedBuffer + 'a>(array: &'a mut B, stride: isize, offset: usize) -> Self {
        Self {
            array,
            stride,
            offset: Some(offset),
        }
    }
}

/// Value returned by a dispatched call.
pub enum Dispatched<'a> {
    /// The dispatcher has no outputs.
    Unit,

    /// The single output buffer, as supplied by the caller.
    Array(&'a mut dyn StridedBuffer),

    /// Every output buffer, in argument order.
    Arrays(Vec<&'a mut dyn StridedBuffer>),
}

impl<'a> Dispatched<'a> {
    fn from_outputs(mut outputs: Vec<&'a mut dyn StridedBuffer>) -> Self {
        match outputs.len() {
            0 => Self::Unit,
            1 => outputs.pop().map_or(Self::Unit, Self::Array),
            _ => Self::Arrays(outputs),
        }
    }

    /// Whether the call produced no outputs.
    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }

    /// The single output buffer, if there is exactly one.
    pub fn into_array(self) -> Option<&'a mut dyn StridedBuffer> {
        match self {
            Self::Array(out) => Some(out),
            _ => None,
        }
    }

    /// Every output buffer.
    pub fn into_arrays(self) -> Vec<&'a mut dyn StridedBuffer> {
        match self {
            Self::Unit => Vec::new(),
            Self::Array(out) => vec![out],
            Self::Arrays(outs) => outs,
        }
    }
}

// ============================================================================
// Dispatcher
// ============================================================================

/// Type-resolving front end for a family of strided kernels.
#[derive(Clone)]
pub struct StridedDispatcher<D = ()> {
    table: KernelTable<StridedFn<D>, D>,
    nargs: usize,
    nin: usize,
    nout: usize,
    has_offsets: bool,
}

impl<D> StridedDispatcher<D> {
    /// Build a dispatcher from kernels and a flat list of type tags.
    ///
    /// `types` holds `nin + nout` tags per kernel, inputs first. `data`, when
    /// given, holds one payload per kernel. `nargs` counts the length argument
    /// plus every array, stride and (if present) offset.
    pub fn new<S: AsRef<str>>(
        kernels: Vec<StridedFn<D>>,
        types: &[S],
        data: Option<Vec<D>>,
        nargs: usize,
        nin: usize,
        nout: usize,
    ) -> Result<Self, NumError> {
        Validator::validate_kernels(kernels.len())?;
        let types = Validator::parse_types(types)?;
        Validator::validate_data(data.as_ref().map(Vec::len), kernels.len())?;
        let data = match data {
            Some(d) => d.into_iter().map(Some).collect(),
            None => kernels.iter().map(|_| None).collect(),
        };
        Self::assemble(kernels, types, data, nargs, nin, nout)
    }

    /// Start a fluent builder for `nin` inputs and `nout` outputs.
    pub fn builder(nin: usize, nout: usize) -> StridedDispatcherBuilder<D> {
        StridedDispatcherBuilder {
            nin,
            nout,
            offsets: false,
            kernels: Vec::new(),
            types: Vec::new(),
            data: Vec::new(),
        }
    }

    fn assemble(
        kernels: Vec<StridedFn<D>>,
        types: Vec<DataType>,
        data: Vec<Option<D>>,
        nargs: usize,
        nin: usize,
        nout: usize,
    ) -> Result<Self, NumError> {
        Validator::validate_counts(nargs, nin, nout)?;
        let arrays = nin + nout;
        Validator::validate_signatures(types.len(), kernels.len(), arrays)?;
        let has_offsets = Validator::validate_convention(nargs, arrays)?;

        Ok(Self {
            table: KernelTable::from_parts(kernels, &types, data, arrays),
            nargs,
            nin,
            nout,
            has_offsets,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Total argument count accepted per call.
    pub fn nargs(&self) -> usize {
        self.nargs
    }

    /// Number of input arrays.
    pub fn nin(&self) -> usize {
        self.nin
    }

    /// Number of output arrays.
    pub fn nout(&self) -> usize {
        self.nout
    }

    /// Whether calls use the offset convention.
    pub fn has_offsets(&self) -> bool {
        self.has_offsets
    }

    /// Registered kernels in resolution order.
    pub fn table(&self) -> &KernelTable<StridedFn<D>, D> {
        &self.table
    }

    // ========================================================================
    // Invocation
    // ========================================================================

    /// Validate `args`, resolve a kernel from their data types and run it over
    /// `n` logical elements.
    pub fn call<'a>(&self, n: usize, args: Vec<StridedArg<'a>>) -> Result<Dispatched<'a>, NumError> {
        let per_array = if self.has_offsets { 3 } else { 2 };
        Validator::validate_call_arity(1 + per_array * args.len(), self.nargs)?;

        for (index, arg) in args.iter().enumerate() {
            match (self.has_offsets, arg.offset) {
                (true, None) => return Err(NumError::MissingOffset { index }),
                (false, Some(_)) => return Err(NumError::UnexpectedOffset { index }),
                _ => {}
            }
            self.check_bounds(index, n, arg)?;
        }

        let dtypes: Vec<DataType> = args.iter().map(|arg| arg.array.data_type()).collect();
        let entry = self.table.resolve(&dtypes).ok_or(NumError::Unresolved)?;

        let strides: Vec<isize> = args.iter().map(|arg| arg.stride).collect();
        let offsets: Option<Vec<usize>> = if self.has_offsets {
            Some(args.iter().map(|arg| arg.offset.unwrap_or(0)).collect())
        } else {
            None
        };
        let mut arrays: Vec<&'a mut dyn StridedBuffer> =
            args.into_iter().map(|arg| arg.array).collect();

        (entry.kernel)(
            &mut arrays,
            &[n],
            &strides,
            offsets.as_deref(),
            entry.data.as_ref(),
        );

        let outputs = arrays.split_off(self.nin);
        Ok(Dispatched::from_outputs(outputs))
    }

    fn check_bounds(&self, index: usize, n: usize, arg: &StridedArg<'_>) -> Result<(), NumError> {
        let len = arg.array.len();
        let accessed = match arg.offset {
            None => {
                let max = max_strided_index(n, arg.stride);
                (n > 0 && max >= len).then(|| isize::try_from(max).unwrap_or(isize::MAX))
            }
            Some(offset) => strided_endpoints(n, arg.stride, offset).first_outside(len),
        };

        match accessed {
            None => Ok(()),
            Some(accessed) if index < self.nin => Err(NumError::InputOutOfBounds {
                index,
                accessed,
                len,
            }),
            Some(accessed) => Err(NumError::OutputOutOfBounds {
                index,
                accessed,
                len,
            }),
        }
    }
}

impl<D> Debug for StridedDispatcher<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("StridedDispatcher")
            .field("kernels", &self.table.len())
            .field("nargs", &self.nargs)
            .field("nin", &self.nin)
            .field("nout", &self.nout)
            .field("has_offsets", &self.has_offsets)
            .finish()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for [`StridedDispatcher`].
pub struct StridedDispatcherBuilder<D = ()> {
    nin: usize,
    nout: usize,
    offsets: bool,
    kernels: Vec<StridedFn<D>>,
    types: Vec<DataType>,
    data: Vec<Option<D>>,
}

impl<D> StridedDispatcherBuilder<D> {
    /// Use the offset convention (`3(nin + nout) + 1` arguments).
    pub fn offsets(mut self, enabled: bool) -> Self {
        self.offsets = enabled;
        self
    }

    /// Register `kernel` for `signature` (inputs first).
    pub fn register(mut self, signature: &[DataType], kernel: StridedFn<D>) -> Self {
        self.kernels.push(kernel);
        self.types.extend_from_slice(signature);
        self.data.push(None);
        self
    }

    /// Register `kernel` for `signature` with a payload.
    pub fn register_with_data(mut self, signature: &[DataType], kernel: StridedFn<D>, data: D) -> Self {
        self.kernels.push(kernel);
        self.types.extend_from_slice(signature);
        self.data.push(Some(data));
        self
    }

    /// Validate and build the dispatcher.
    pub fn build(self) -> Result<StridedDispatcher<D>, NumError> {
        Validator::validate_kernels(self.kernels.len())?;
        let per_array = if self.offsets { 3 } else { 2 };
        let nargs = per_array * (self.nin + self.nout) + 1;
        StridedDispatcher::assemble(
            self.kernels,
            self.types,
            self.data,
            nargs,
            self.nin,
            self.nout,
        )
    }
}
