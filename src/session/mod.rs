//! Session Module
//!
//! Runs the catalog's text protocol over any async reader/writer pair. The
//! binary connects it to stdin and stdout; tests drive it from in-memory
//! buffers.
//!
//! ## Architecture
//!
//! ```text
//!        reader                                   writer
//!          │                                        ▲
//!          ▼                                        │
//! ┌─────────────────────────────────────────────────┴───────────┐
//! │                   SessionHandler                            │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │ Split lines │───>│ Parse line  │───>│ Execute     │     │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘     │
//! │                                               │             │
//! │                                        RequestHandler       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use itemstore::commands::RequestHandler;
//! use itemstore::session::run_session;
//! use itemstore::storage::BoundedStore;
//!
//! # tokio_test::block_on(async {
//! let mut handler = RequestHandler::new(BoundedStore::new(10));
//! let mut output = Vec::new();
//!
//! run_session(&b"CREATE widget\nGET 1\n"[..], &mut output, &mut handler)
//!     .await
//!     .unwrap();
//! assert_eq!(output, b"(integer) 1\n\"widget\"\n");
//! # });
//! ```

pub mod handler;

// Re-export commonly used types
pub use handler::{run_session, SessionError, SessionHandler, SessionStats, MAX_LINE_SIZE};
