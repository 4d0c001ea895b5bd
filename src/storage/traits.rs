//! Store trait: the capability set every backend provides.
//!
//! The request handler is written against [`ItemStore`] only, so a backend can
//! be swapped without touching the command layer. `Box<dyn ItemStore>` is
//! itself an `ItemStore`, which is how the binary picks a backend at runtime.

use std::fmt;
use std::str::FromStr;

use crate::storage::error::Result;
use crate::storage::record::{ItemFilter, ItemId, Record, DEFAULT_CATEGORY};

/// The available storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Fixed capacity, slots never reclaimed
    #[default]
    Bounded,
    /// Growable sequence, swap-with-last removal
    Vec,
    /// Ordered lookup table, order-preserving removal
    Map,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Bounded => "bounded",
            Backend::Vec => "vec",
            Backend::Map => "map",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bounded" => Ok(Backend::Bounded),
            "vec" => Ok(Backend::Vec),
            "map" => Ok(Backend::Map),
            other => Err(format!("unknown backend '{}'", other)),
        }
    }
}

/// The item store interface.
///
/// # Invariants
///
/// - Ids are assigned by the store, strictly increasing, and never reused.
/// - Inactive (soft-deleted) records are invisible to every read, list and
///   count operation, but still occupy storage until reclaimed.
/// - A failed operation leaves the store unchanged.
pub trait ItemStore {
    /// Which backend this is.
    fn kind(&self) -> Backend;

    /// Creates an active record and returns its id.
    ///
    /// An empty `category` means [`DEFAULT_CATEGORY`].
    fn create_with_category(&mut self, name: &str, category: &str) -> Result<ItemId>;

    /// Returns the active record with this id.
    fn find(&self, id: ItemId) -> Option<&Record>;

    /// Renames an active record.
    ///
    /// Returns `false`, changing nothing, if the record is missing, inactive,
    /// or the new name fails validation.
    fn update(&mut self, id: ItemId, name: &str) -> bool;

    /// Soft-deletes a record.
    ///
    /// Returns `true` only if an active record was deactivated. Unknown or
    /// already-deleted ids are a silent no-op.
    fn delete(&mut self, id: ItemId) -> bool;

    /// Every stored record, active or not, in storage order.
    fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_>;

    /// Number of records physically stored, active or not.
    fn len(&self) -> usize;

    /// The id the next successful create will return.
    fn next_id(&self) -> ItemId;

    /// Fixed capacity, if the backend has one.
    fn capacity(&self) -> Option<usize> {
        None
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates an active record in the default category.
    fn create(&mut self, name: &str) -> Result<ItemId> {
        self.create_with_category(name, DEFAULT_CATEGORY)
    }

    /// Returns the name of the active record with this id.
    fn get(&self, id: ItemId) -> Option<&str> {
        self.find(id).map(|record| record.name.as_str())
    }

    fn exists(&self, id: ItemId) -> bool {
        self.find(id).is_some()
    }

    /// Active records in storage order.
    fn active(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.records().filter(|record| record.active))
    }

    /// Up to `limit` active records in storage order.
    fn list(&self, limit: usize) -> Vec<Record> {
        self.active().take(limit).cloned().collect()
    }

    /// Appends up to `max` active records to `buffer` and returns how many
    /// were appended.
    fn list_into(&self, buffer: &mut Vec<Record>, max: usize) -> usize {
        let before = buffer.len();
        buffer.extend(self.active().take(max).cloned());
        buffer.len() - before
    }

    /// Up to `limit` active records passing `filter`, in storage order.
    fn list_filtered(&self, filter: &ItemFilter, limit: usize) -> Vec<Record> {
        self.active()
            .filter(|record| filter.matches(record))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Number of active records.
    fn count(&self) -> usize {
        self.active().count()
    }
}

/// Physical removal, offered by the dynamic backends.
///
/// Removing a record retires its id for good: the id counter is not rewound.
pub trait Reclaim: ItemStore {
    /// Removes the record with this id, active or not, and returns it.
    fn remove(&mut self, id: ItemId) -> Option<Record>;
}

impl<S: ItemStore + ?Sized> ItemStore for Box<S> {
    fn kind(&self) -> Backend {
        (**self).kind()
    }

    fn create_with_category(&mut self, name: &str, category: &str) -> Result<ItemId> {
        (**self).create_with_category(name, category)
    }

    fn find(&self, id: ItemId) -> Option<&Record> {
        (**self).find(id)
    }

    fn update(&mut self, id: ItemId, name: &str) -> bool {
        (**self).update(id, name)
    }

    fn delete(&mut self, id: ItemId) -> bool {
        (**self).delete(id)
    }

    fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        (**self).records()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn next_id(&self) -> ItemId {
        (**self).next_id()
    }

    fn capacity(&self) -> Option<usize> {
        (**self).capacity()
    }
}
