//! Configuration
//!
//! Runtime settings for the `itemstore` binary, parsed from command-line
//! arguments. The store itself only ever sees `max_items` and `backend`;
//! the logging threshold is applied by the subscriber set up in `main`.

use crate::storage::Backend;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::Level;

/// Default capacity of the bounded store.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Default number of records returned by `LIST` without an explicit limit.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Errors produced while parsing command-line arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("invalid value '{value}' for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}

/// Threshold below which log messages are suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    pub fn to_level(self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capacity of a bounded store; allocation hint otherwise
    pub max_items: usize,
    /// Forces the log threshold down to debug
    pub debug_mode: bool,
    /// Log threshold
    pub log_level: LogLevel,
    /// Which store to construct
    pub backend: Backend,
    /// Records returned by `LIST` without a limit
    pub list_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            debug_mode: false,
            log_level: LogLevel::Info,
            backend: Backend::Bounded,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl Config {
    /// The threshold actually applied, taking `debug_mode` into account.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug_mode {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Run one command (if given) or an interactive session
    Run {
        config: Config,
        command: Vec<String>,
    },
    Help,
    Version,
}

/// Parses command-line arguments, excluding the program name.
///
/// Flags come first; the first positional argument starts the command, and
/// everything from there on belongs to it. `--` ends flag parsing explicitly.
pub fn parse_args<I>(args: I) -> Result<Invocation, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut config = Config::default();
    let mut args = args.into_iter();
    let mut command = Vec::new();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--max-items" | "-m" => config.max_items = parse_value(&arg, args.next())?,
            "--log-level" | "-l" => config.log_level = parse_value(&arg, args.next())?,
            "--backend" | "-b" => config.backend = parse_value(&arg, args.next())?,
            "--list-limit" => config.list_limit = parse_value(&arg, args.next())?,
            "--debug" | "-d" => config.debug_mode = true,
            "--help" | "-h" => return Ok(Invocation::Help),
            "--version" | "-v" => return Ok(Invocation::Version),
            "--" => {
                command.extend(args.by_ref());
            }
            flag if flag.starts_with('-') => {
                return Err(ConfigError::UnknownArgument(flag.to_string()));
            }
            _ => {
                command.push(arg);
                command.extend(args.by_ref());
            }
        }
    }

    Ok(Invocation::Run { config, command })
}

fn parse_value<T: FromStr>(flag: &str, value: Option<String>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(list: &[&str]) -> (Config, Vec<String>) {
        match parse_args(args(list)).unwrap() {
            Invocation::Run { config, command } => (config, command),
            other => panic!("expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let (config, command) = run(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.max_items, 100);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.debug_mode);
        assert!(command.is_empty());
    }

    #[test]
    fn test_flags() {
        let (config, _) = run(&[
            "--max-items",
            "5",
            "--backend",
            "map",
            "-l",
            "warn",
            "--list-limit",
            "7",
        ]);
        assert_eq!(config.max_items, 5);
        assert_eq!(config.backend, Backend::Map);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.list_limit, 7);
    }

    #[test]
    fn test_debug_mode_overrides_level() {
        let (config, _) = run(&["--log-level", "error", "--debug"]);
        assert_eq!(config.log_level, LogLevel::Error);
        assert_eq!(config.effective_log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_command_collects_remaining_args() {
        let (config, command) = run(&["-b", "vec", "create", "--weird-name", "tools"]);
        assert_eq!(config.backend, Backend::Vec);
        assert_eq!(command, args(&["create", "--weird-name", "tools"]));

        let (_, command) = run(&["--", "-x"]);
        assert_eq!(command, args(&["-x"]));
    }

    #[test]
    fn test_help_and_version() {
        assert_eq!(parse_args(args(&["--help"])), Ok(Invocation::Help));
        assert_eq!(parse_args(args(&["-v"])), Ok(Invocation::Version));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            parse_args(args(&["--max-items"])),
            Err(ConfigError::MissingValue("--max-items".to_string()))
        );
        assert_eq!(
            parse_args(args(&["--max-items", "lots"])),
            Err(ConfigError::InvalidValue {
                flag: "--max-items".to_string(),
                value: "lots".to_string()
            })
        );
        assert_eq!(
            parse_args(args(&["--port", "1"])),
            Err(ConfigError::UnknownArgument("--port".to_string()))
        );
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("trace".parse::<LogLevel>().is_err());
        assert!(LogLevel::Debug < LogLevel::Error);
        assert_eq!(LogLevel::Warn.to_level(), Level::WARN);
    }
}
