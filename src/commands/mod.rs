//! Command Handler Module
//!
//! This module implements the request-handling layer of the catalog.
//! It receives parsed requests, executes them against the store,
//! and returns appropriate responses.
//!
//! ## Architecture
//!
//! ```text
//! Command line
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  Line Parser    │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ RequestHandler  │  (this module)
//! │                 │
//! │  - Dispatch     │
//! │  - Log outcome  │
//! │  - Render reply │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   ItemStore     │  (storage module)
//! └─────────────────┘
//! ```

pub mod handler;

// Re-export the main request handler
pub use handler::{usage, RequestHandler};
