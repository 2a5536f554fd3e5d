//! Configuration management for fanlog
//!
//! This module defines the `Config` struct used to set up a [`Logger`](crate::Logger)
//! without code: the verbosity level, an optional hostname override, and the
//! provider ids subscribed to each severity. It uses the `figment` crate to
//! load a TOML file and merge it with environment variables.

use crate::core::{Level, Severity};
use crate::error::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dispatcher configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Verbosity level: `error`, `info`, `debug`, or an integer.
    pub level: String,
    /// Hostname printed on every line instead of the one the OS reports.
    #[serde(default)]
    pub hostname: Option<String>,
    /// Provider ids subscribed to each severity, in dispatch order.
    #[serde(default)]
    pub subscriptions: SubscriptionConfig,
}

/// Subscriber ids per severity.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct SubscriptionConfig {
    #[serde(default)]
    pub log: Vec<String>,
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default)]
    pub fatal: Vec<String>,
    #[serde(default)]
    pub debug: Vec<String>,
}

impl SubscriptionConfig {
    pub fn for_severity(&self, severity: Severity) -> &[String] {
        match severity {
            Severity::Log => &self.log,
            Severity::Error => &self.error,
            Severity::Fatal => &self.fatal,
            Severity::Debug => &self.debug,
        }
    }
}

impl Config {
    /// Loads configuration by layering defaults, the TOML file at
    /// `config_path` (skipped if missing), and `FANLOG_` environment variables.
    ///
    /// Nested keys use a double underscore, e.g.
    /// `FANLOG_SUBSCRIPTIONS__ERROR='["console"]'`.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = Self::figment()
            .merge(Toml::file(config_path.as_ref()))
            .merge(Env::prefixed("FANLOG_").split("__"))
            .extract()?;
        Ok(config)
    }

    /// Loads configuration from defaults and environment variables only.
    pub fn from_env() -> Result<Self> {
        let config: Config = Self::figment()
            .merge(Env::prefixed("FANLOG_").split("__"))
            .extract()?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new().merge(Serialized::defaults(Config::default()))
    }

    /// Parses the configured level.
    pub fn level(&self) -> Result<Level> {
        self.level.parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
            hostname: None,
            subscriptions: SubscriptionConfig::default(),
        }
    }
}
