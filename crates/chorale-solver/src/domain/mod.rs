//! Explicit finite domains.
//!
//! Every variable owns a contiguous run of 64-bit words in one flat
//! vector. Bit `k` of a variable's run stands for the value `offset + k`.
//! Cloning a store is a single `memcpy` of that vector, which is what the
//! copying search relies on.

mod set;
mod store;

pub use set::ValueSet;
pub use store::{DomainStore, Values};

/// Raised when a domain becomes empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failure;

/// Result of a domain operation: `Ok(true)` when the domain shrank.
pub type DomainResult = Result<bool, Failure>;

#[cfg(test)]
mod tests;
