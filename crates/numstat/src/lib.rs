//! # numstat: Strided dispatch, moving statistics and LOWESS for Rust
//!
//! Three building blocks for numerical array code:
//!
//! * **Dispatch**: turn a family of type-specialized kernels into one callable
//!   that validates strided (or n-dimensional) array arguments and picks the
//!   kernel matching their runtime data types.
//! * **Moving statistics**: O(1) covariance and correlation over the last `W`
//!   pairs of a stream, with estimated or known means.
//! * **LOWESS**: Cleveland's robust locally weighted regression, returning
//!   fitted values for data sorted by x.
//!
//! ## Quick Start
//!
//! ### LOWESS
//!
//! ```rust
//! use numstat::prelude::*;
//!
//! let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = vec![2.0, 4.1, 5.9, 8.2, 9.8];
//!
//! // Build the model
//! let model = Lowess::new()
//!     .fraction(0.8)      // Use 80% of data for each local fit
//!     .iterations(3)      // 3 robustness iterations
//!     .adapter(Batch)
//!     .build()?;
//!
//! // Fit the model to the data
//! let result = model.fit(&x, &y)?;
//!
//! println!("{}", result);
//! # Result::<(), NumError>::Ok(())
//! ```
//!
//! ### Moving covariance
//!
//! ```rust
//! use numstat::prelude::*;
//!
//! let mut acc = MovingCovariance::<f64>::new(3)?;
//!
//! assert_eq!(acc.value(), None);
//! assert_eq!(acc.push(2.0, 1.0), 0.0);
//! acc.push(-5.0, 3.14);
//! acc.push(3.0, -1.0);
//! let v = acc.push(5.0, -9.5);
//! assert!((v + 29.42).abs() < 1e-9);
//! # Result::<(), NumError>::Ok(())
//! ```
//!
//! ### Strided dispatch
//!
//! ```rust
//! use numstat::prelude::*;
//!
//! fn scale_f64(
//!     arrays: &mut [&mut dyn StridedBuffer],
//!     shape: &[usize],
//!     strides: &[isize],
//!     _offsets: Option<&[usize]>,
//!     _data: Option<&()>,
//! ) {
//!     let input: Vec<f64> = arrays[0].downcast_slice::<f64>().unwrap().to_vec();
//!     let out = arrays[1].downcast_slice_mut::<f64>().unwrap();
//!     for i in 0..shape[0] {
//!         out[i * strides[1] as usize] = 2.0 * input[i * strides[0] as usize];
//!     }
//! }
//!
//! let double = StridedDispatcher::builder(1, 1)
//!     .register(&[DataType::Float64, DataType::Float64], scale_f64)
//!     .build()?;
//!
//! let mut x = vec![1.0_f64, 2.0, 3.0];
//! let mut y = vec![0.0_f64; 3];
//! double.call(3, vec![StridedArg::new(&mut x, 1), StridedArg::new(&mut y, 1)])?;
//! assert_eq!(y, vec![2.0, 4.0, 6.0]);
//! # Result::<(), NumError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Every fallible operation returns `Result<_, NumError>`. Each error belongs
//! to one [`ErrorKind`](prelude::ErrorKind):
//!
//! - **`InvalidType`**: a value of the wrong kind (unknown type tag, missing mean).
//! - **`InvalidRange`**: a value out of range (arity, bounds, window, fraction).
//! - **`Unresolved`**: no registered kernel accepts the runtime data types.
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments with `alloc`. Disable default
//! features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! numstat = { version = "0.1", default-features = false }
//! ```
//!
//! ## References
//!
//! - Cleveland, W. S. (1979). "Robust Locally Weighted Regression and Smoothing Scatterplots"
//! - Cleveland, W. S. (1981). "LOWESS: A Program for Smoothing Scatterplots by Robust Locally Weighted Regression"
//! - Welford, B. P. (1962). "Note on a Method for Calculating Corrected Sums of Squares and Products"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - regression, robustness and co-moment updates.
mod algorithms;

// Layer 4: Engine - orchestration and validation.
mod engine;

// Layer 5: Adapters - execution mode adapters.
mod adapters;

// Layer 5: Dispatch - kernel resolution over array arguments.
mod dispatch;

// High-level API.
mod api;

// Standard numstat prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::Batch, BatchLowess, BufferExt, DataType, Dispatched, ErrorKind,
        LowessBuilder as Lowess, LowessResult, MovingCorrelation, MovingCovariance, NdArray,
        NdDispatched, NdDispatcher, NdFn, NumError, Order, StridedArg, StridedBuffer,
        StridedDispatcher, StridedDispatcherBuilder, StridedFn, Uint8c, implied_offset,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod dispatch {
        pub use crate::dispatch::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
