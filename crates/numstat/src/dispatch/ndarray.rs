//! Multiple dispatch over n-dimensional array kernels.
//!
//! ## Purpose
//!
//! This module is the n-dimensional counterpart of the strided dispatcher:
//! arguments are full array descriptors (buffer, shape, strides, offset,
//! memory order) and kernels receive the descriptors directly.
//!
//! ## Design notes
//!
//! * **One argument per array**: `nargs` must equal `nin + nout`.
//! * **Bounds**: The smallest and largest index any element maps to must lie
//!   in the buffer; arrays with a zero-length dimension touch nothing.
//! * **Shared resolution**: Uses the same ordered first-match table as the
//!   strided dispatcher.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::fmt::{self, Debug, Formatter};

// Internal dependencies
use crate::dispatch::table::KernelTable;
use crate::engine::validator::Validator;
use crate::math::strided::{column_major_strides, nd_bounds, nd_index, numel, row_major_strides};
use crate::primitives::buffer::StridedBuffer;
use crate::primitives::dtype::DataType;
use crate::primitives::errors::NumError;

// ============================================================================
// Array Descriptor
// ============================================================================

/// Memory layout of an n-d array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Last dimension varies fastest.
    #[default]
    RowMajor,

    /// First dimension varies fastest.
    ColumnMajor,
}

/// N-dimensional view over a strided buffer.
pub struct NdArray<'a> {
    /// Backing buffer.
    pub buffer: &'a mut dyn StridedBuffer,

    /// Extent of each dimension.
    pub shape: Vec<usize>,

    /// Buffer step per dimension.
    pub strides: Vec<isize>,

    /// Buffer index of the first element.
    pub offset: usize,

    /// Memory layout.
    pub order: Order,
}

impl<'a> NdArray<'a> {
    /// View with explicit strides and offset.
    pub fn new<B: StridedBuffer + 'a>(
        buffer: &'a mut B,
        shape: Vec<usize>,
        strides: Vec<isize>,
        offset: usize,
        order: Order,
    ) -> Self {
        Self {
            buffer,
            shape,
            strides,
            offset,
            order,
        }
    }

    /// Contiguous view starting at index zero.
    pub fn contiguous<B: StridedBuffer + 'a>(buffer: &'a mut B, shape: Vec<usize>, order: Order) -> Self {
        let strides = match order {
            Order::RowMajor => row_major_strides(&shape),
            Order::ColumnMajor => column_major_strides(&shape),
        };
        Self::new(buffer, shape, strides, 0, order)
    }

    /// Number of dimensions.
    pub fn ndims(&self) -> usize {
        self.shape.len()
    }

    /// Number of elements.
    pub fn numel(&self) -> usize {
        numel(&self.shape)
    }

    /// Buffer index of the element at `subscripts`.
    pub fn index(&self, subscripts: &[usize]) -> isize {
        nd_index(subscripts, &self.strides, self.offset)
    }

    /// Runtime element type tag.
    pub fn data_type(&self) -> DataType {
        self.buffer.data_type()
    }
}

/// Value returned by a dispatched call.
pub enum NdDispatched<'a> {
    /// The dispatcher has no outputs.
    Unit,

    /// The single output array.
    Array(NdArray<'a>),

    /// Every output array, in argument order.
    Arrays(Vec<NdArray<'a>>),
}

impl<'a> NdDispatched<'a> {
    /// The single output array, if there is exactly one.
    pub fn into_array(self) -> Option<NdArray<'a>> {
        match self {
            Self::Array(out) => Some(out),
            _ => None,
        }
    }

    /// Every output array.
    pub fn into_arrays(self) -> Vec<NdArray<'a>> {
        match self {
            Self::Unit => Vec::new(),
            Self::Array(out) => vec![out],
            Self::Arrays(outs) => outs,
        }
    }
}

/// Kernel calling convention: `(arrays, data)`.
pub type NdFn<D> = fn(&mut [NdArray<'_>], Option<&D>);

// ============================================================================
// Dispatcher
// ============================================================================

/// Type-resolving front end for a family of n-d kernels.
#[derive(Clone)]
pub struct NdDispatcher<D = ()> {
    table: KernelTable<NdFn<D>, D>,
    nin: usize,
    nout: usize,
}

impl<D> NdDispatcher<D> {
    /// Build a dispatcher from kernels and a flat list of type tags.
    pub fn new<S: AsRef<str>>(
        kernels: Vec<NdFn<D>>,
        types: &[S],
        data: Option<Vec<D>>,
        nargs: usize,
        nin: usize,
        nout: usize,
    ) -> Result<Self, NumError> {
        Validator::validate_kernels(kernels.len())?;
        let types = Validator::parse_types(types)?;
        Validator::validate_data(data.as_ref().map(Vec::len), kernels.len())?;
        Validator::validate_counts(nargs, nin, nout)?;

        let arrays = nin + nout;
        Validator::validate_signatures(types.len(), kernels.len(), arrays)?;
        if nargs != arrays {
            return Err(NumError::InconsistentArity { nargs, arrays });
        }

        let data = match data {
            Some(d) => d.into_iter().map(Some).collect(),
            None => kernels.iter().map(|_| None).collect(),
        };
        Ok(Self {
            table: KernelTable::from_parts(kernels, &types, data, arrays),
            nin,
            nout,
        })
    }

    /// Number of input arrays.
    pub fn nin(&self) -> usize {
        self.nin
    }

    /// Number of output arrays.
    pub fn nout(&self) -> usize {
        self.nout
    }

    /// Validate `args`, resolve a kernel from their data types and run it.
    pub fn call<'a>(&self, mut args: Vec<NdArray<'a>>) -> Result<NdDispatched<'a>, NumError> {
        Validator::validate_call_arity(args.len(), self.nin + self.nout)?;

        for (index, arr) in args.iter().enumerate() {
            if arr.strides.len() != arr.shape.len() {
                return Err(NumError::ShapeMismatch {
                    index,
                    ndims: arr.shape.len(),
                    nstrides: arr.strides.len(),
                });
            }
            self.check_bounds(index, arr)?;
        }

        let dtypes: Vec<DataType> = args.iter().map(NdArray::data_type).collect();
        let entry = self.table.resolve(&dtypes).ok_or(NumError::Unresolved)?;

        (entry.kernel)(&mut args, entry.data.as_ref());

        let mut outputs = args.split_off(self.nin);
        Ok(match outputs.len() {
            0 => NdDispatched::Unit,
            1 => outputs.pop().map_or(NdDispatched::Unit, NdDispatched::Array),
            _ => NdDispatched::Arrays(outputs),
        })
    }

    fn check_bounds(&self, index: usize, arr: &NdArray<'_>) -> Result<(), NumError> {
        let len = arr.buffer.len();
        let accessed = nd_bounds(&arr.shape, &arr.strides, arr.offset).first_outside(len);

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

impl<D> Debug for NdDispatcher<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("NdDispatcher")
            .field("kernels", &self.table.len())
            .field("nin", &self.nin)
            .field("nout", &self.nout)
            .finish()
    }
}
