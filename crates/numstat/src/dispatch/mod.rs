//! Layer 5: Dispatch
//!
//! # Purpose
//!
//! This layer turns a family of interchangeable kernels into a single
//! callable that validates array arguments and resolves the kernel from
//! their runtime data types.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters, Dispatch ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Ordered kernel registrations.
pub mod table;

/// One-dimensional strided dispatch.
pub mod strided;

/// N-dimensional dispatch.
pub mod ndarray;
