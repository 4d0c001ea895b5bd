//! Request Handler
//!
//! Adapts the catalog's logical operations onto an [`ItemStore`] and turns
//! their outcomes into log events and [`Response`] values.
//!
//! ## Outcomes
//!
//! The store never reports "not found" as an error. The handler keeps the
//! two failure shapes apart:
//!
//! | outcome           | log level | reply                   |
//! |-------------------|-----------|-------------------------|
//! | not found         | `warn`    | `(nil)` / `(integer) 0` |
//! | creation failed   | `error`   | `(error) ERR ...`       |
//! | success           | `info`    | value                   |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     RequestHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │  execute()  │───>│  handle_*() │───>│  Response   │     │
//! │  └─────────────┘    └──────┬──────┘    └─────────────┘     │
//! │                            │                                │
//! │                            ▼                                │
//! │                      impl ItemStore                         │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::config::DEFAULT_LIST_LIMIT;
use crate::protocol::{Request, Response};
use crate::storage::{ItemFilter, ItemId, ItemStore, Record, StoreError};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Handles catalog requests against an owned store.
///
/// The handler holds no item state of its own; every call is answered from
/// the store.
pub struct RequestHandler<S> {
    /// The store, owned for the handler's lifetime
    store: S,
    /// `LIST` limit when none is given
    list_limit: usize,
    /// Start time for INFO
    start_time: Instant,
}

impl<S: ItemStore> RequestHandler<S> {
    /// Creates a handler that takes ownership of `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            list_limit: DEFAULT_LIST_LIMIT,
            start_time: Instant::now(),
        }
    }

    /// Sets the default `LIST` limit.
    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives the store back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Returns the name of an active item.
    pub fn handle_get(&self, id: ItemId) -> Option<String> {
        match self.store.get(id) {
            Some(name) => {
                info!(id, name, "Item found");
                Some(name.to_string())
            }
            None => {
                warn!(id, "Item not found");
                None
            }
        }
    }

    /// Creates an item. A `None` or empty category means the default one.
    pub fn handle_create(
        &mut self,
        name: &str,
        category: Option<&str>,
    ) -> Result<ItemId, StoreError> {
        let result = self
            .store
            .create_with_category(name, category.unwrap_or_default());
        match &result {
            Ok(id) => info!(id, name, "Item created"),
            Err(e) => error!(error = %e, "Failed to create item"),
        }
        result
    }

    /// Renames an active item.
    pub fn handle_update(&mut self, id: ItemId, name: &str) -> bool {
        let updated = self.store.update(id, name);
        if updated {
            info!(id, name, "Item updated");
        } else {
            warn!(id, "Item not updated");
        }
        updated
    }

    /// Soft-deletes an item. Unknown ids are a no-op.
    pub fn handle_delete(&mut self, id: ItemId) -> bool {
        let deleted = self.store.delete(id);
        if deleted {
            info!(id, "Item deleted");
        } else {
            warn!(id, "Item not found");
        }
        deleted
    }

    /// Lists active items, oldest slot first.
    pub fn handle_list(&self, limit: Option<usize>, filter: &ItemFilter) -> Vec<Record> {
        let limit = limit.unwrap_or(self.list_limit);
        let records = if filter.is_empty() {
            self.store.list(limit)
        } else {
            self.store.list_filtered(filter, limit)
        };
        debug!(limit, returned = records.len(), "Listed items");
        records
    }

    pub fn handle_count(&self) -> usize {
        self.store.count()
    }

    /// Executes a parsed request and returns the reply.
    pub fn execute(&mut self, request: Request) -> Response {
        debug!(command = request.name(), "Executing request");

        match request {
            Request::Create { name, category } => {
                match self.handle_create(&name, category.as_deref()) {
                    Ok(id) => Response::integer(id),
                    Err(e) => Response::error(format!("ERR {}", e)),
                }
            }
            Request::Get { id } => match self.handle_get(id) {
                Some(name) => Response::text(name),
                None => Response::nil(),
            },
            Request::Update { id, name } => Response::boolean(self.handle_update(id, &name)),
            Request::Delete { id } => Response::boolean(self.handle_delete(id)),
            Request::Exists { id } => Response::boolean(self.store.exists(id)),
            Request::List { limit, filter } => Response::Records(self.handle_list(limit, &filter)),
            Request::Count => Response::length(self.handle_count()),
            Request::Info => self.info(),
            Request::Help => Response::Lines(usage()),
            Request::Ping => Response::pong(),
            Request::Quit => Response::ok(),
        }
    }

    /// INFO
    fn info(&self) -> Response {
        let capacity = match self.store.capacity() {
            Some(capacity) => capacity.to_string(),
            None => "unbounded".to_string(),
        };

        Response::Lines(vec![
            "# Server".to_string(),
            format!("version:{}", crate::VERSION),
            format!("uptime_in_seconds:{}", self.start_time.elapsed().as_secs()),
            "# Store".to_string(),
            format!("backend:{}", self.store.kind()),
            format!("capacity:{}", capacity),
            format!("slots:{}", self.store.len()),
            format!("active:{}", self.store.count()),
            format!("next_id:{}", self.store.next_id()),
            format!("list_limit:{}", self.list_limit),
        ])
    }
}

/// Lines printed by HELP.
pub fn usage() -> Vec<String> {
    [
        "CREATE <name> [category]   create an item, replies with its id",
        "GET <id>                   name of an active item, or (nil)",
        "UPDATE <id> <name>         rename an active item",
        "DELETE <id>                soft-delete an item",
        "EXISTS <id>                1 if the item is active",
        "LIST [limit] [CATEGORY <c>] [MATCH <text>]",
        "COUNT                      number of active items",
        "INFO | PING | HELP | QUIT",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect()
}
