//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates LOWESS execution: the pass driver, input and
//! parameter validation shared by every component, and the result type.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters, Dispatch
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// LOWESS pass driver.
pub mod executor;

/// Result structures.
pub mod output;

/// Validation utilities.
pub mod validator;
