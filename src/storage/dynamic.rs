//! Unbounded Stores
//!
//! Two growable backends with the same contract as [`BoundedStore`], plus
//! physical removal through [`Reclaim`]. They differ in what removal does to
//! the order of the surviving records:
//!
//! | backend    | lookup   | `remove`                    | order after `remove` |
//! |------------|----------|-----------------------------|----------------------|
//! | `VecStore` | O(n)     | swap with last, shrink by 1 | NOT preserved        |
//! | `MapStore` | O(log n) | delete key                  | preserved (id order) |
//!
//! Both keep a separate id counter, so removing the newest record never
//! makes its id available again.
//!
//! [`BoundedStore`]: crate::storage::BoundedStore

use std::collections::BTreeMap;

use crate::storage::error::{Result, StoreError};
use crate::storage::record::{validate_name, ItemId, Record};
use crate::storage::scan;
use crate::storage::traits::{Backend, ItemStore, Reclaim};

/// A growable store over a contiguous sequence.
#[derive(Debug, Clone)]
pub struct VecStore {
    records: Vec<Record>,
    /// Last id handed out
    counter: ItemId,
}

impl VecStore {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty store with room for `hint` records before reallocating.
    ///
    /// # Panics
    ///
    /// Panics if the buffer cannot be allocated, like [`Vec::with_capacity`].
    pub fn with_capacity(hint: usize) -> Self {
        Self {
            records: Vec::with_capacity(hint),
            counter: 0,
        }
    }

    /// Like [`VecStore::with_capacity`], reporting allocation failure as an error.
    pub fn try_with_capacity(hint: usize) -> Result<Self> {
        let mut records = Vec::new();
        records
            .try_reserve_exact(hint)
            .map_err(|_| StoreError::AllocationFailed { capacity: hint })?;
        Ok(Self {
            records,
            counter: 0,
        })
    }
}

impl Default for VecStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore for VecStore {
    fn kind(&self) -> Backend {
        Backend::Vec
    }

    fn create_with_category(&mut self, name: &str, category: &str) -> Result<ItemId> {
        validate_name(name)?;

        self.counter += 1;
        self.records
            .push(Record::new(self.counter, name).with_category(category));
        Ok(self.counter)
    }

    fn find(&self, id: ItemId) -> Option<&Record> {
        scan::find_active(&self.records, id)
    }

    fn update(&mut self, id: ItemId, name: &str) -> bool {
        scan::rename_active(&mut self.records, id, name)
    }

    fn delete(&mut self, id: ItemId) -> bool {
        scan::deactivate(&mut self.records, id)
    }

    fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.records.iter())
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn next_id(&self) -> ItemId {
        self.counter + 1
    }
}

impl Reclaim for VecStore {
    /// Swaps the record with the last one and shrinks the sequence.
    ///
    /// O(1) after the lookup; the previously-last record takes the removed
    /// record's position.
    fn remove(&mut self, id: ItemId) -> Option<Record> {
        let index = scan::position(&self.records, id)?;
        Some(self.records.swap_remove(index))
    }
}

/// A growable store keyed by id.
///
/// Ids are assigned in increasing order, so iterating the map yields records
/// in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MapStore {
    records: BTreeMap<ItemId, Record>,
    counter: ItemId,
}

impl MapStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for MapStore {
    fn kind(&self) -> Backend {
        Backend::Map
    }

    fn create_with_category(&mut self, name: &str, category: &str) -> Result<ItemId> {
        validate_name(name)?;

        self.counter += 1;
        let record = Record::new(self.counter, name).with_category(category);
        self.records.insert(self.counter, record);
        Ok(self.counter)
    }

    fn find(&self, id: ItemId) -> Option<&Record> {
        self.records.get(&id).filter(|record| record.active)
    }

    fn update(&mut self, id: ItemId, name: &str) -> bool {
        if validate_name(name).is_err() {
            return false;
        }
        match self.records.get_mut(&id) {
            Some(record) if record.active => {
                record.name = name.to_string();
                true
            }
            _ => false,
        }
    }

    fn delete(&mut self, id: ItemId) -> bool {
        self.records
            .get_mut(&id)
            .map(Record::deactivate)
            .unwrap_or(false)
    }

    fn records(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.records.values())
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn next_id(&self) -> ItemId {
        self.counter + 1
    }
}

impl Reclaim for MapStore {
    fn remove(&mut self, id: ItemId) -> Option<Record> {
        self.records.remove(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::error::StoreError;
    use crate::storage::record::NameError;

    #[test]
    fn test_vec_try_with_capacity() {
        let mut store = VecStore::try_with_capacity(4).unwrap();
        assert_eq!(store.create("a"), Ok(1));

        assert_eq!(
            VecStore::try_with_capacity(usize::MAX).unwrap_err(),
            StoreError::AllocationFailed {
                capacity: usize::MAX
            }
        );
    }

    fn ids<S: ItemStore>(store: &S) -> Vec<ItemId> {
        store.list(usize::MAX).iter().map(|r| r.id).collect()
    }

    fn populated<S: ItemStore>(mut store: S) -> S {
        for name in ["a", "b", "c", "d"] {
            store.create(name).unwrap();
        }
        store
    }

    #[test]
    fn test_vec_remove_swaps_with_last() {
        let mut store = populated(VecStore::new());

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.name, "a");
        assert_eq!(ids(&store), vec![4, 2, 3]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_map_remove_preserves_order() {
        let mut store = populated(MapStore::new());

        store.remove(1).unwrap();
        assert_eq!(ids(&store), vec![2, 3, 4]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut store = populated(VecStore::new());
        assert_eq!(store.remove(99), None);
        assert_eq!(store.len(), 4);

        let mut store = populated(MapStore::new());
        assert_eq!(store.remove(99), None);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_remove_does_not_recycle_ids() {
        let mut store = populated(VecStore::new());
        store.remove(4);
        assert_eq!(store.create("e"), Ok(5));

        let mut store = populated(MapStore::new());
        store.remove(4);
        assert_eq!(store.create("e"), Ok(5));
    }

    #[test]
    fn test_removed_ids_never_resurface() {
        let mut store = populated(MapStore::new());
        store.remove(2);

        assert_eq!(store.get(2), None);
        assert!(!store.update(2, "z"));
        assert!(!store.delete(2));
        assert!(!ids(&store).contains(&2));
    }

    #[test]
    fn test_remove_inactive_record() {
        let mut store = populated(VecStore::new());
        store.delete(3);

        let removed = store.remove(3).unwrap();
        assert!(!removed.active);
        assert_eq!(store.count(), 3);
    }

    #[test]
    fn test_soft_delete_keeps_slot() {
        let mut store = populated(MapStore::new());

        assert!(store.delete(1));
        assert_eq!(store.len(), 4);
        assert_eq!(store.count(), 3);
        assert_eq!(store.get(1), None);
    }

    #[test]
    fn test_dynamic_stores_are_unbounded() {
        let mut store = VecStore::with_capacity(2);
        for i in 0..100 {
            store.create(&format!("item-{}", i)).unwrap();
        }
        assert_eq!(store.count(), 100);
        assert_eq!(store.capacity(), None);
    }

    #[test]
    fn test_invalid_name_does_not_consume_id() {
        let mut store = MapStore::new();
        assert_eq!(
            store.create(""),
            Err(StoreError::InvalidName(NameError::Empty))
        );
        assert_eq!(store.create("a"), Ok(1));
    }
}
