//! Request and Response Types
//!
//! A [`Request`] is one parsed command line. A [`Response`] is what the
//! handler sends back; its `Display` form is the exact text written to the
//! client, one reply per line (multi-line replies for listings).
//!
//! ## Reply Format
//!
//! ```text
//! OK                                      status
//! (integer) 2                             ids, counts, booleans as 0/1
//! "widget"                                a name
//! (nil)                                   absent
//! 1) id=2 name="b" category="default"     records
//! (empty list)                            no records
//! (error) ERR unknown command 'FOO'       failure
//! ```

use crate::storage::{ItemFilter, ItemId, Record};
use std::fmt;

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `CREATE <name> [category]`
    Create {
        name: String,
        category: Option<String>,
    },
    /// `GET <id>`
    Get { id: ItemId },
    /// `UPDATE <id> <name>`
    Update { id: ItemId, name: String },
    /// `DELETE <id>`
    Delete { id: ItemId },
    /// `EXISTS <id>`
    Exists { id: ItemId },
    /// `LIST [limit] [CATEGORY <c>] [MATCH <q>]`
    List {
        limit: Option<usize>,
        filter: ItemFilter,
    },
    /// `COUNT`
    Count,
    /// `INFO`
    Info,
    /// `HELP`
    Help,
    /// `PING`
    Ping,
    /// `QUIT`
    Quit,
}

impl Request {
    /// The command word, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Request::Create { .. } => "CREATE",
            Request::Get { .. } => "GET",
            Request::Update { .. } => "UPDATE",
            Request::Delete { .. } => "DELETE",
            Request::Exists { .. } => "EXISTS",
            Request::List { .. } => "LIST",
            Request::Count => "COUNT",
            Request::Info => "INFO",
            Request::Help => "HELP",
            Request::Ping => "PING",
            Request::Quit => "QUIT",
        }
    }
}

/// A reply to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Plain status line, e.g. `OK` or `PONG`
    Status(String),

    /// Integer reply; ids, counts and booleans are never negative
    Integer(u64),

    /// A quoted text value
    Text(String),

    /// Absent value
    Nil,

    /// A numbered listing of records
    Records(Vec<Record>),

    /// Free-form lines (HELP, INFO)
    Lines(Vec<String>),

    /// Error reply
    Error(String),
}

impl Response {
    /// Common response for successful operations
    pub fn ok() -> Self {
        Response::Status("OK".to_string())
    }

    pub fn pong() -> Self {
        Response::Status("PONG".to_string())
    }

    pub fn integer(n: u64) -> Self {
        Response::Integer(n)
    }

    /// A count or length. Values that do not fit a `u64` become an error reply.
    pub fn length(n: usize) -> Self {
        match u64::try_from(n) {
            Ok(n) => Response::Integer(n),
            Err(_) => Response::error(format!("ERR value out of range: {}", n)),
        }
    }

    /// `(integer) 1` for true, `(integer) 0` for false.
    pub fn boolean(b: bool) -> Self {
        Response::Integer(u64::from(b))
    }

    pub fn text(s: impl Into<String>) -> Self {
        Response::Text(s.into())
    }

    pub fn nil() -> Self {
        Response::Nil
    }

    pub fn error(s: impl Into<String>) -> Self {
        Response::Error(s.into())
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Response::Nil)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Response::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Renders the reply followed by a newline, ready to be written out.
    pub fn serialize(&self) -> Vec<u8> {
        format!("{}\n", self).into_bytes()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Status(s) => write!(f, "{}", s),
            Response::Integer(n) => write!(f, "(integer) {}", n),
            Response::Text(s) => write!(f, "{:?}", s),
            Response::Nil => write!(f, "(nil)"),
            Response::Records(records) => {
                if records.is_empty() {
                    return write!(f, "(empty list)");
                }
                for (i, record) in records.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{}) {}", i + 1, record)?;
                }
                Ok(())
            }
            Response::Lines(lines) => write!(f, "{}", lines.join("\n")),
            Response::Error(s) => write!(f, "(error) {}", s),
        }
    }
}
