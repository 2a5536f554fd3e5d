//! Core domain types and the provider contract for fanlog
//!
//! This module defines the severities a message can carry, the verbosity
//! level that gates them, and the trait every output sink implements.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The channel a message travels on.
///
/// Each severity has its own subscriber list on the [`Logger`](crate::Logger).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Log,
    Error,
    Fatal,
    Debug,
}

impl Severity {
    /// All severities, in the order subscription lists are kept.
    pub const ALL: [Severity; 4] = [
        Severity::Log,
        Severity::Error,
        Severity::Fatal,
        Severity::Debug,
    ];

    /// The tag that opens every formatted line for this severity.
    pub fn tag(self) -> &'static str {
        match self {
            Severity::Log => "LOG",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Debug => "DEBUG",
        }
    }

    /// The minimum level at which this severity is dispatched, if it is gated at all.
    pub fn required_level(self) -> Option<Level> {
        match self {
            Severity::Log => Some(Level::INFO),
            Severity::Debug => Some(Level::DEBUG),
            Severity::Error | Severity::Fatal => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log" | "info" => Ok(Severity::Log),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            "debug" => Ok(Severity::Debug),
            _ => Err(Error::UnknownSeverity(s.to_string())),
        }
    }
}

/// Verbosity threshold for `log` and `debug` messages.
///
/// Any integer is accepted; values outside the three named levels simply
/// compare below `ERROR` or above `DEBUG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Level(i32);

impl Level {
    pub const ERROR: Level = Level(0);
    pub const INFO: Level = Level(1);
    pub const DEBUG: Level = Level(2);

    pub const fn new(value: i32) -> Self {
        Level(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Level(value)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Level::ERROR => f.write_str("error"),
            Level::INFO => f.write_str("info"),
            Level::DEBUG => f.write_str("debug"),
            Level(other) => write!(f, "{}", other),
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "error" => Ok(Level::ERROR),
            "info" => Ok(Level::INFO),
            "debug" => Ok(Level::DEBUG),
            _ => trimmed
                .parse::<i32>()
                .map(Level)
                .map_err(|_| Error::UnknownLevel(s.to_string())),
        }
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// An output sink that receives fully formatted messages.
///
/// Implementations own their delivery (console, file, socket). They must not
/// panic across this boundary and should not block for long, since dispatch
/// runs synchronously on the caller's thread. Records a provider sends
/// through the `log` facade while handling a bridged record are dropped.
pub trait Provider: Send + Sync {
    /// A stable, unique identifier. Used as the registry key and in
    /// subscription lists.
    fn id(&self) -> &str;

    /// Receives a message from the `log` channel.
    fn log(&self, msg: &[u8]);

    /// Receives a message from the `error` channel.
    fn error(&self, msg: &[u8]);

    /// Receives a message from the `fatal` channel. The process exits once
    /// every fatal subscriber has returned.
    fn fatal(&self, msg: &[u8]);

    /// Receives a message from the `debug` channel.
    fn debug(&self, msg: &[u8]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_ordered_by_verbosity() {
        assert!(Level::ERROR < Level::INFO);
        assert!(Level::INFO < Level::DEBUG);
        assert_eq!(Level::default(), Level::ERROR);
        assert!(Level::new(-3) < Level::ERROR);
        assert!(Level::new(9) > Level::DEBUG);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::INFO);
        assert_eq!(" DEBUG ".parse::<Level>().unwrap(), Level::DEBUG);
        assert_eq!("7".parse::<Level>().unwrap(), Level::new(7));
        assert!(matches!(
            "verbose".parse::<Level>(),
            Err(Error::UnknownLevel(s)) if s == "verbose"
        ));
    }

    #[test]
    fn test_severity_tags() {
        let tags: Vec<&str> = Severity::ALL.iter().map(|s| s.tag()).collect();
        assert_eq!(tags, vec!["LOG", "ERROR", "FATAL", "DEBUG"]);
    }

    #[test]
    fn test_severity_from_str() {
        assert_eq!("info".parse::<Severity>().unwrap(), Severity::Log);
        assert_eq!("Fatal".parse::<Severity>().unwrap(), Severity::Fatal);
        assert!(matches!(
            "warn".parse::<Severity>(),
            Err(Error::UnknownSeverity(_))
        ));
    }

    #[test]
    fn test_only_log_and_debug_are_gated() {
        assert_eq!(Severity::Log.required_level(), Some(Level::INFO));
        assert_eq!(Severity::Debug.required_level(), Some(Level::DEBUG));
        assert_eq!(Severity::Error.required_level(), None);
        assert_eq!(Severity::Fatal.required_level(), None);
    }
}
