//! # itemstore - A Minimal In-Process Item Catalog
//!
//! itemstore keeps named records in memory: create, fetch, update,
//! soft-delete and list them, through a small typed API or a line-oriented
//! text protocol.
//!
//! ## Features
//!
//! - **Monotonic identities**: ids are 1-based, strictly increasing and never reused
//! - **Soft delete**: deleted records keep their storage but vanish from every read
//! - **Pluggable storage**: a fixed-capacity store and two growable ones behind one trait
//! - **Text protocol**: `CREATE`, `GET`, `UPDATE`, `DELETE`, `LIST`, `COUNT`, ...
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              itemstore                                  │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ stdin/stdout│───>│  Session    │───>│  Request    │                  │
//! │  │             │    │  Handler    │    │  Handler    │                  │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘                  │
//! │                                               │                         │
//! │                                               ▼                         │
//! │  ┌─────────────┐    ┌──────────────────────────────────────────────┐   │
//! │  │   Line      │    │              trait ItemStore                 │   │
//! │  │   Parser    │    │  ┌────────────┐ ┌────────────┐ ┌────────────┐ │   │
//! │  │             │    │  │BoundedStore│ │  VecStore  │ │  MapStore  │ │   │
//! │  └─────────────┘    │  └────────────┘ └────────────┘ └────────────┘ │   │
//! │                     └──────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use itemstore::commands::RequestHandler;
//! use itemstore::protocol::{parse_line, Response};
//! use itemstore::storage::BoundedStore;
//!
//! let mut handler = RequestHandler::new(BoundedStore::new(100));
//!
//! let reply = handler.execute(parse_line("CREATE widget").unwrap());
//! assert_eq!(reply, Response::integer(1));
//!
//! let reply = handler.execute(parse_line("GET 1").unwrap());
//! assert_eq!(reply.to_string(), "\"widget\"");
//! ```
//!
//! ## Module Overview
//!
//! - [`storage`]: records, validation and the store backends
//! - [`protocol`]: request parsing and reply rendering
//! - [`commands`]: the request handler
//! - [`session`]: the read-execute-respond loop
//! - [`config`]: command-line configuration
//!
//! ## Design Highlights
//!
//! ### Single Owner
//!
//! A store is constructed once and moved into the handler. There is no
//! global catalog and no locking; callers needing shared access wrap the
//! handler in their own mutex.
//!
//! ### Absence Is Not an Error
//!
//! Looking up a missing or deleted id yields `None`/`false`. Only rejected
//! mutations (bad name, full store) produce a [`StoreError`].

pub mod commands;
pub mod config;
pub mod protocol;
pub mod session;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::RequestHandler;
pub use config::{Config, LogLevel};
pub use protocol::{ParseError, Request, Response};
pub use session::{run_session, SessionError, SessionStats};
pub use storage::{
    open, Backend, BoundedStore, ItemId, ItemStore, MapStore, Reclaim, Record, StoreError,
    VecStore,
};

/// Version of itemstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
