//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the core numeric procedures: the local regression
//! at a query point, robustness reweighting, delta-skipping interpolation,
//! and the sliding co-moment updates behind the moving accumulators.
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Local weighted regression.
pub mod regression;

/// Robustness weight updates.
pub mod robustness;

/// Delta-skipping and interpolation.
pub mod interpolation;

/// Sliding-window co-moments.
pub mod comoment;
