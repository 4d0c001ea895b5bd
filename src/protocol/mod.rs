//! Command Protocol
//!
//! A line-oriented text protocol for talking to the catalog.
//!
//! ## Modules
//!
//! - `types`: `Request` and `Response`, and how replies are rendered
//! - `parser`: tokenizer and command parser
//!
//! ## Example
//!
//! ```
//! use itemstore::protocol::{parse_line, Request, Response};
//!
//! let request = parse_line("GET 1").unwrap();
//! assert_eq!(request, Request::Get { id: 1 });
//!
//! assert_eq!(Response::nil().serialize(), b"(nil)\n");
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{parse_bytes, parse_line, parse_tokens, tokenize, ParseError, ParseResult};
pub use types::{Request, Response};
