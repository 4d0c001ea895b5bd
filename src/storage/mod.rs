//! Storage Module
//!
//! This module owns the catalog's records: identity assignment, name
//! validation, soft delete and the active-only view.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    trait ItemStore                          │
//! │   create · find/get · update · delete · list · count        │
//! └──────────────┬──────────────────┬──────────────────┬────────┘
//!                │                  │                  │
//!        ┌───────▼──────┐   ┌───────▼──────┐   ┌───────▼──────┐
//!        │ BoundedStore │   │   VecStore   │   │   MapStore   │
//!        │ fixed slots  │   │ swap_remove  │   │ BTreeMap     │
//!        └──────────────┘   └──────────────┘   └──────────────┘
//!                              └──── trait Reclaim ────┘
//! ```
//!
//! ## Features
//!
//! - **Monotonic ids**: 1-based, strictly increasing, never reused
//! - **Soft delete**: deleted records keep their storage but disappear from reads
//! - **Capacity floor**: the bounded store rejects creates once full, without mutation
//! - **Reclaim**: the dynamic stores can physically remove records
//!
//! ## Example
//!
//! ```
//! use itemstore::storage::{open, Backend, ItemStore};
//!
//! let mut store = open(Backend::Bounded, 100).unwrap();
//! let a = store.create("a").unwrap();
//! let b = store.create("b").unwrap();
//! store.delete(a);
//!
//! let listed = store.list(10);
//! assert_eq!(listed.len(), 1);
//! assert_eq!(listed[0].id, b);
//! assert_eq!(store.get(a), None);
//! ```

pub mod bounded;
pub mod dynamic;
pub mod error;
pub mod record;
mod scan;
pub mod traits;

// Re-export commonly used types
pub use bounded::BoundedStore;
pub use dynamic::{MapStore, VecStore};
pub use error::{Result, StoreError};
pub use record::{
    validate_name, ItemFilter, ItemId, NameError, Record, DEFAULT_CATEGORY, MAX_NAME_LEN,
};
pub use traits::{Backend, ItemStore, Reclaim};

/// Constructs a store of the given kind.
///
/// `max_items` is the capacity of a bounded store and only an allocation
/// hint for the dynamic ones. A buffer that cannot be allocated is reported
/// as [`StoreError::AllocationFailed`].
pub fn open(backend: Backend, max_items: usize) -> Result<Box<dyn ItemStore>> {
    let store: Box<dyn ItemStore> = match backend {
        Backend::Bounded => Box::new(BoundedStore::try_new(max_items)?),
        Backend::Vec => Box::new(VecStore::try_with_capacity(max_items)?),
        Backend::Map => Box::new(MapStore::new()),
    };
    Ok(store)
}
