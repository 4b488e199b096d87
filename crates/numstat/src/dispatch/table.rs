//! Ordered kernel registrations and first-match resolution.
//!
//! ## Purpose
//!
//! This module stores `(signature, kernel, data)` registrations in
//! declaration order and resolves runtime data types to the first
//! registration whose signature matches exactly.
//!
//! ## Design notes
//!
//! * **Linear scan**: Resolution walks registrations in order, so overlapping
//!   signatures are tie-broken by declaration order.
//! * **No coercion**: A signature matches only if every tag is equal.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// Internal dependencies
use crate::primitives::dtype::DataType;

// ============================================================================
// Registration
// ============================================================================

/// One kernel with its signature and optional payload.
#[derive(Debug, Clone)]
pub struct Registration<K, D> {
    /// Data types of the kernel's arrays, inputs first.
    pub signature: Vec<DataType>,

    /// Kernel implementation.
    pub kernel: K,

    /// Payload passed to the kernel when it is selected.
    pub data: Option<D>,
}

// ============================================================================
// Kernel Table
// ============================================================================

/// Registrations in declaration order.
#[derive(Debug, Clone)]
pub struct KernelTable<K, D> {
    entries: Vec<Registration<K, D>>,
    arity: usize,
}

impl<K, D> KernelTable<K, D> {
    /// Pair kernels with consecutive `arity`-sized chunks of `types`.
    ///
    /// Callers validate that `types.len() == kernels.len() * arity` and that
    /// `data` has one entry per kernel.
    pub fn from_parts(
        kernels: Vec<K>,
        types: &[DataType],
        data: Vec<Option<D>>,
        arity: usize,
    ) -> Self {
        let entries = kernels
            .into_iter()
            .zip(types.chunks(arity))
            .zip(data)
            .map(|((kernel, signature), data)| Registration {
                signature: signature.to_vec(),
                kernel,
                data,
            })
            .collect();
        Self { entries, arity }
    }

    /// First registration whose signature equals `dtypes`.
    pub fn resolve(&self, dtypes: &[DataType]) -> Option<&Registration<K, D>> {
        self.entries
            .iter()
            .find(|entry| entry.signature.as_slice() == dtypes)
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Arrays per signature (`nin + nout`).
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Registrations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Registration<K, D>> {
        self.entries.iter()
    }
}
