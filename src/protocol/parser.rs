//! Command Line Parser
//!
//! Turns one line of text into a [`Request`].
//!
//! ## Tokenizing
//!
//! Arguments are separated by whitespace. A double-quoted argument may
//! contain whitespace; inside quotes `\"` and `\\` are escapes, and the
//! closing quote must end the argument. Quotes are what make an empty
//! argument expressible (`CREATE ""`), which the store then rejects as an
//! invalid name.
//!
//! ## Commands
//!
//! Command words and option keywords are case-insensitive:
//!
//! ```text
//! CREATE <name> [category]
//! GET <id> | UPDATE <id> <name> | DELETE <id> | EXISTS <id>
//! LIST [limit] [CATEGORY <category>] [MATCH <text>]
//! COUNT | INFO | HELP | PING | QUIT
//! ```

use crate::protocol::types::Request;
use crate::storage::{ItemFilter, ItemId};
use thiserror::Error;

/// Errors that can occur while parsing a command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line contains no tokens
    #[error("empty command")]
    EmptyCommand,

    /// Unrecognized command word
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Too few or too many arguments
    #[error("wrong number of arguments for '{0}' command")]
    WrongArity(&'static str),

    /// An id argument is not a non-negative integer
    #[error("invalid id '{0}'")]
    InvalidId(String),

    /// A limit argument is not a non-negative integer
    #[error("invalid limit '{0}'")]
    InvalidLimit(String),

    /// Unrecognized LIST option
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// A quoted argument is missing its closing quote
    #[error("unterminated quoted argument")]
    UnterminatedQuote,

    /// A closing quote is followed directly by more text
    #[error("closing quote must be followed by a space")]
    TextAfterQuote,

    /// The line is not valid UTF-8
    #[error("invalid UTF-8 in command line")]
    InvalidUtf8,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Splits a line into arguments, honoring double quotes.
pub fn tokenize(line: &str) -> ParseResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}

        let Some(&first) = chars.peek() else {
            return Ok(tokens);
        };

        let mut token = String::new();
        if first == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some(escaped @ ('"' | '\\')) => token.push(escaped),
                        Some(other) => {
                            token.push('\\');
                            token.push(other);
                        }
                        None => return Err(ParseError::UnterminatedQuote),
                    },
                    Some(c) => token.push(c),
                    None => return Err(ParseError::UnterminatedQuote),
                }
            }
            if chars.peek().is_some_and(|c| !c.is_whitespace()) {
                return Err(ParseError::TextAfterQuote);
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                token.push(c);
            }
        }
        tokens.push(token);
    }
}

/// Parses one command line.
pub fn parse_line(line: &str) -> ParseResult<Request> {
    parse_tokens(&tokenize(line)?)
}

/// Parses raw bytes as a command line.
pub fn parse_bytes(line: &[u8]) -> ParseResult<Request> {
    let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidUtf8)?;
    parse_line(line)
}

/// Parses an already-split command, such as the binary's positional arguments.
pub fn parse_tokens<S: AsRef<str>>(tokens: &[S]) -> ParseResult<Request> {
    let (command, args) = tokens.split_first().ok_or(ParseError::EmptyCommand)?;
    let args: Vec<&str> = args.iter().map(|arg| arg.as_ref()).collect();

    match command.as_ref().to_ascii_uppercase().as_str() {
        "CREATE" => match args.as_slice() {
            [name] => Ok(Request::Create {
                name: name.to_string(),
                category: None,
            }),
            [name, category] => Ok(Request::Create {
                name: name.to_string(),
                category: Some(category.to_string()),
            }),
            _ => Err(ParseError::WrongArity("create")),
        },
        "GET" => Ok(Request::Get {
            id: single_id(&args, "get")?,
        }),
        "UPDATE" => match args.as_slice() {
            [id, name] => Ok(Request::Update {
                id: parse_id(id)?,
                name: name.to_string(),
            }),
            _ => Err(ParseError::WrongArity("update")),
        },
        "DELETE" | "DEL" => Ok(Request::Delete {
            id: single_id(&args, "delete")?,
        }),
        "EXISTS" => Ok(Request::Exists {
            id: single_id(&args, "exists")?,
        }),
        "LIST" => parse_list(&args),
        "COUNT" => no_args(&args, "count", Request::Count),
        "INFO" => no_args(&args, "info", Request::Info),
        "HELP" => no_args(&args, "help", Request::Help),
        "PING" => no_args(&args, "ping", Request::Ping),
        "QUIT" | "EXIT" => no_args(&args, "quit", Request::Quit),
        _ => Err(ParseError::UnknownCommand(command.as_ref().to_string())),
    }
}

fn parse_id(arg: &str) -> ParseResult<ItemId> {
    arg.parse()
        .map_err(|_| ParseError::InvalidId(arg.to_string()))
}

fn single_id(args: &[&str], command: &'static str) -> ParseResult<ItemId> {
    match args {
        [id] => parse_id(id),
        _ => Err(ParseError::WrongArity(command)),
    }
}

fn no_args(args: &[&str], command: &'static str, request: Request) -> ParseResult<Request> {
    if args.is_empty() {
        Ok(request)
    } else {
        Err(ParseError::WrongArity(command))
    }
}

/// `LIST [limit] [CATEGORY <category>] [MATCH <text>]`
fn parse_list(args: &[&str]) -> ParseResult<Request> {
    let mut rest = args;
    let mut limit = None;

    if let Some((first, tail)) = rest.split_first() {
        if first.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
            limit = Some(
                first
                    .parse::<usize>()
                    .map_err(|_| ParseError::InvalidLimit(first.to_string()))?,
            );
            rest = tail;
        }
    }

    let mut filter = ItemFilter::new();
    while let Some((option, tail)) = rest.split_first() {
        let (value, tail) = tail.split_first().ok_or(ParseError::WrongArity("list"))?;
        match option.to_ascii_uppercase().as_str() {
            "CATEGORY" => filter.category = Some(value.to_string()),
            "MATCH" => filter.name_contains = Some(value.to_string()),
            _ => return Err(ParseError::UnknownOption(option.to_string())),
        }
        rest = tail;
    }

    Ok(Request::List { limit, filter })
}
