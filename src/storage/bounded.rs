//! Capacity-Bounded Store
//!
//! An array-backed store whose buffer is allocated once at construction.
//! Every create places a record in the next free slot; slots are never
//! reclaimed, so a soft-deleted record keeps its slot (and its id) for the
//! lifetime of the store.
//!
//! ```text
//!   capacity = 4
//!   ┌──────────┬──────────┬──────────┬──────────┐
//!   │ id=1  ✗  │ id=2  ✓  │ id=3  ✓  │  (free)  │   size = 3
//!   └──────────┴──────────┴──────────┴──────────┘
//!     deleted     active     active
//! ```
//!
//! Because slots are never reused, the id of the record in slot `i` is
//! always `i + 1`.

use crate::storage::error::{Result, StoreError};
use crate::storage::record::{validate_name, ItemId, Record};
use crate::storage::scan;
use crate::storage::traits::{Backend, ItemStore};

/// A fixed-capacity store with soft delete.
///
/// # Example
///
/// ```
/// use itemstore::storage::{BoundedStore, ItemStore};
///
/// let mut store = BoundedStore::new(2);
/// let a = store.create("a").unwrap();
/// let b = store.create("b").unwrap();
/// assert!(store.create("c").is_err());
///
/// store.delete(a);
/// assert_eq!(store.get(a), None);
/// assert_eq!(store.get(b), Some("b"));
/// assert_eq!(store.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedStore {
    /// Backing buffer; `slots.len()` is the number of slots ever filled
    slots: Vec<Record>,
    capacity: usize,
}

impl BoundedStore {
    /// Creates an empty store holding at most `capacity` records.
    ///
    /// # Panics
    ///
    /// Panics if the buffer cannot be allocated, like [`Vec::with_capacity`].
    /// Use [`BoundedStore::try_new`] for capacities that come from user input.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Creates an empty store, reporting allocation failure as an error.
    pub fn try_new(capacity: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| StoreError::AllocationFailed { capacity })?;
        Ok(Self { slots, capacity })
    }

    /// Number of free slots left.
    pub fn remaining(&self) -> usize {
        self.capacity - self.slots.len()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }
}

impl ItemStore for BoundedStore {
    fn kind(&self) -> Backend {
        Backend::Bounded
    }

    fn create_with_category(&mut self, name: &str, category: &str) -> Result<ItemId> {
        if self.is_full() {
            return Err(StoreError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        validate_name(name)?;

        let id = self.next_id();
        self.slots.push(Record::new(id, name).with_category(category));
        Ok(id)
    }

    fn find(&self, id: ItemId) -> Option<&Record> {
        scan::find_active(&self.slots, id)
    }

    fn update(&mut self, id: ItemId, name: &str) -> bool {
        scan::rename_active(&mut self.slots, id, name)
    }

    fn delete(&mut self, id: ItemId) -> bool {
        scan::deactivate(&mut self.slots, id)
    }

    fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.slots.iter())
    }

    fn len(&self) -> usize {
        self.slots.len()
    }

    fn next_id(&self) -> ItemId {
        self.slots.len() as ItemId + 1
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::record::{NameError, MAX_NAME_LEN};

    #[test]
    fn test_try_new() {
        let store = BoundedStore::try_new(3).unwrap();
        assert_eq!(store.capacity(), Some(3));
        assert_eq!(store.remaining(), 3);

        assert_eq!(
            BoundedStore::try_new(usize::MAX).unwrap_err(),
            StoreError::AllocationFailed {
                capacity: usize::MAX
            }
        );
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut store = BoundedStore::new(10);

        assert_eq!(store.create("a"), Ok(1));
        assert_eq!(store.create("b"), Ok(2));
        assert_eq!(store.create("c"), Ok(3));
        assert_eq!(store.len(), 3);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_create_uses_default_category() {
        let mut store = BoundedStore::new(10);

        let id = store.create("a").unwrap();
        assert_eq!(store.find(id).unwrap().category, "default");

        let id = store.create_with_category("b", "tools").unwrap();
        assert_eq!(store.find(id).unwrap().category, "tools");
    }

    #[test]
    fn test_capacity_exceeded_leaves_state_unchanged() {
        let mut store = BoundedStore::new(3);
        for name in ["a", "b", "c"] {
            store.create(name).unwrap();
        }

        let before = store.list(10);
        assert_eq!(
            store.create("d"),
            Err(StoreError::CapacityExceeded { capacity: 3 })
        );
        assert_eq!(store.len(), 3);
        assert_eq!(store.next_id(), 4);
        assert_eq!(store.list(10), before);
    }

    #[test]
    fn test_deleted_slots_are_not_reclaimed() {
        let mut store = BoundedStore::new(2);
        let a = store.create("a").unwrap();
        store.create("b").unwrap();

        assert!(store.delete(a));
        assert_eq!(store.count(), 1);
        assert_eq!(store.remaining(), 0);
        assert!(store.create("c").is_err());
    }

    #[test]
    fn test_invalid_names_rejected() {
        let mut store = BoundedStore::new(10);

        assert_eq!(
            store.create(""),
            Err(StoreError::InvalidName(NameError::Empty))
        );
        assert!(matches!(
            store.create(&"x".repeat(MAX_NAME_LEN + 1)),
            Err(StoreError::InvalidName(NameError::TooLong { .. }))
        ));
        assert_eq!(store.len(), 0);
        assert_eq!(store.create("ok"), Ok(1));
    }

    #[test]
    fn test_full_store_reports_capacity_before_name() {
        let mut store = BoundedStore::new(0);
        assert_eq!(
            store.create(""),
            Err(StoreError::CapacityExceeded { capacity: 0 })
        );
    }

    #[test]
    fn test_get_update_round_trip() {
        let mut store = BoundedStore::new(10);
        let id = store.create("X").unwrap();

        assert_eq!(store.get(id), Some("X"));
        assert!(store.update(id, "Y"));
        assert_eq!(store.get(id), Some("Y"));
    }

    #[test]
    fn test_update_rejects_invalid_name() {
        let mut store = BoundedStore::new(10);
        let id = store.create("X").unwrap();

        assert!(!store.update(id, ""));
        assert!(!store.update(id, &"x".repeat(MAX_NAME_LEN + 1)));
        assert_eq!(store.get(id), Some("X"));
    }

    #[test]
    fn test_no_resurrection() {
        let mut store = BoundedStore::new(10);
        let id = store.create("X").unwrap();
        store.delete(id);

        assert!(!store.update(id, "Y"));
        assert!(!store.delete(id));
        assert_eq!(store.get(id), None);

        let slot = store.records().find(|r| r.id == id).unwrap();
        assert_eq!(slot.name, "X");
        assert!(!slot.active);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut store = BoundedStore::new(10);

        assert_eq!(store.get(1), None);
        assert!(!store.update(1, "a"));
        assert!(!store.delete(1));
        assert!(store.list(10).is_empty());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_list_into_skips_inactive_without_counting() {
        let mut store = BoundedStore::new(10);
        for name in ["a", "b", "c", "d"] {
            store.create(name).unwrap();
        }
        store.delete(1);
        store.delete(2);

        let mut buffer = Vec::new();
        assert_eq!(store.list_into(&mut buffer, 2), 2);
        let ids: Vec<_> = buffer.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 4]);

        assert_eq!(store.list_into(&mut buffer, 0), 0);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_scenario() {
        let mut store = BoundedStore::new(100);

        assert_eq!(store.create("a"), Ok(1));
        assert_eq!(store.create("b"), Ok(2));
        store.delete(1);

        let expected = Record::new(2, "b");
        assert_eq!(store.list(10), vec![expected]);
        assert_eq!(store.count(), 1);
        assert_eq!(store.get(1), None);
    }
}
