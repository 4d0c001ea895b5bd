//! Linear-scan primitives shared by the slice-backed stores.

use crate::storage::record::{validate_name, ItemId, Record};

/// Position of the record with this id, active or not.
#[inline]
pub(crate) fn position(records: &[Record], id: ItemId) -> Option<usize> {
    records.iter().position(|record| record.id == id)
}

/// The active record with this id.
#[inline]
pub(crate) fn find_active(records: &[Record], id: ItemId) -> Option<&Record> {
    records
        .iter()
        .find(|record| record.id == id && record.active)
}

pub(crate) fn rename_active(records: &mut [Record], id: ItemId, name: &str) -> bool {
    if validate_name(name).is_err() {
        return false;
    }
    match records
        .iter_mut()
        .find(|record| record.id == id && record.active)
    {
        Some(record) => {
            record.name = name.to_string();
            true
        }
        None => false,
    }
}

pub(crate) fn deactivate(records: &mut [Record], id: ItemId) -> bool {
    records
        .iter_mut()
        .find(|record| record.id == id)
        .map(Record::deactivate)
        .unwrap_or(false)
}
