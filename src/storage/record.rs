//! Records and Name Validation
//!
//! This module defines the [`Record`] stored by every backend, the identity
//! type, and the validation rules applied to names before any mutation.

use std::fmt;
use thiserror::Error;

/// Identity of a record. Assigned by the store, 1-based, never reused.
pub type ItemId = u64;

/// Maximum length of a name, in bytes.
pub const MAX_NAME_LEN: usize = 256;

/// Category given to records created without one.
pub const DEFAULT_CATEGORY: &str = "default";

/// Why a name was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The name is the empty string
    #[error("name cannot be empty")]
    Empty,

    /// The name is longer than [`MAX_NAME_LEN`] bytes
    #[error("name is {len} bytes (max: {max})")]
    TooLong { len: usize, max: usize },
}

/// Checks that a name is non-empty and at most [`MAX_NAME_LEN`] bytes.
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(NameError::TooLong {
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// A stored item.
///
/// Records are only ever handed out by value (see [`ItemStore::list`]) or by
/// shared reference, so the identity cannot be changed from outside a store.
///
/// [`ItemStore::list`]: crate::storage::ItemStore::list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Store-assigned identity
    pub id: ItemId,
    /// Display name, 1 to 256 bytes
    pub name: String,
    /// Free-form category
    pub category: String,
    /// `false` once the record has been soft-deleted
    pub active: bool,
}

impl Record {
    /// Creates an active record in the default category.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: DEFAULT_CATEGORY.to_string(),
            active: true,
        }
    }

    /// Sets the category. An empty category falls back to the default.
    pub fn with_category(mut self, category: &str) -> Self {
        if !category.is_empty() {
            self.category = category.to_string();
        }
        self
    }

    /// Marks the record as logically deleted.
    ///
    /// Returns `true` if the record was active before the call.
    pub fn deactivate(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id={} name={:?} category={:?}",
            self.id, self.name, self.category
        )
    }
}

/// Narrows a listing by category and/or name substring.
///
/// An empty filter matches every active record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    /// Exact category match
    pub category: Option<String>,
    /// Case-insensitive substring of the name
    pub name_contains: Option<String>,
}

impl ItemFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn name_contains(mut self, query: impl Into<String>) -> Self {
        self.name_contains = Some(query.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.name_contains.is_none()
    }

    /// Returns true if the record passes the filter. Activity is not checked here.
    pub fn matches(&self, record: &Record) -> bool {
        if let Some(category) = &self.category {
            if record.category != *category {
                return false;
            }
        }
        if let Some(query) = &self.name_contains {
            if !record
                .name
                .to_lowercase()
                .contains(&query.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}
