//! Error types for store operations.
//!
//! Only failures that reject a mutation are errors. A missing or inactive
//! record is reported as `None` or `false` by the operation itself.

use crate::storage::record::NameError;
use thiserror::Error;

/// Errors returned by [`ItemStore::create`](crate::storage::ItemStore::create)
/// and by [`open`](crate::storage::open).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The name failed validation
    #[error("invalid name: {0}")]
    InvalidName(#[from] NameError),

    /// A bounded store is full
    #[error("capacity exceeded (capacity: {capacity})")]
    CapacityExceeded { capacity: usize },

    /// The store's buffer could not be allocated up front
    #[error("cannot allocate room for {capacity} items")]
    AllocationFailed { capacity: usize },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
