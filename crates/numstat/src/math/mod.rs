//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions: LOWESS weight kernels,
//! robust scale estimation and strided index arithmetic.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters, Dispatch
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Tricube and bisquare weight functions.
pub mod kernel;

/// Residual scale estimation.
pub mod scaling;

/// Strided index arithmetic.
pub mod strided;
