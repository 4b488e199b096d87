//! Layer 5: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing processors that adapt the engine layer
//! to how data arrives:
//!
//! - **Batch**: LOWESS over a complete in-memory dataset
//! - **Online**: Moving covariance and correlation over a stream of pairs
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

/// Batch adapter for LOWESS smoothing.
pub mod batch;

/// Moving covariance and correlation accumulators.
pub mod online;
