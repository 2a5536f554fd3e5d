//! Error types for fanlog.
//!
//! None of the logging calls return these. They surface only where text is
//! parsed into severities or levels, and where configuration is loaded.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown severity: {0:?}")]
    UnknownSeverity(String),

    #[error("unknown level: {0:?}")]
    UnknownLevel(String),

    #[error("failed to load configuration: {0}")]
    Config(#[from] figment::Error),

    #[error("a global logger is already installed")]
    SetLogger(#[from] log::SetLoggerError),
}

pub type Result<T> = std::result::Result<T, Error>;
