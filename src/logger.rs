//! The dispatcher: provider registry, per-severity subscriptions, level
//! gating and fan-out.

use crate::config::Config;
use crate::core::{Level, Provider, Severity};
use crate::error::Result;
use crate::formatting::{CallSite, MessageFormatter};
use crate::part::Part;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

/// Routes formatted messages to registered providers.
///
/// Registration and subscription take `&mut self`; logging takes `&self`.
/// Sharing a `Logger` across threads means wrapping it in a lock, as
/// [`LogBridge`](crate::bridge::LogBridge) does.
pub struct Logger {
    providers: HashMap<String, Box<dyn Provider>>,
    log_providers: Vec<String>,
    error_providers: Vec<String>,
    fatal_providers: Vec<String>,
    debug_providers: Vec<String>,
    level: Level,
    formatter: MessageFormatter,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<&str> = self.providers.keys().map(String::as_str).collect();
        registered.sort_unstable();
        f.debug_struct("Logger")
            .field("providers", &registered)
            .field("log_providers", &self.log_providers)
            .field("error_providers", &self.error_providers)
            .field("fatal_providers", &self.fatal_providers)
            .field("debug_providers", &self.debug_providers)
            .field("level", &self.level)
            .field("formatter", &self.formatter)
            .finish()
    }
}

impl Logger {
    /// Creates a dispatcher with no providers, at [`Level::ERROR`].
    pub fn new() -> Self {
        Self::with_formatter(MessageFormatter::new())
    }

    pub fn with_formatter(formatter: MessageFormatter) -> Self {
        Self {
            providers: HashMap::new(),
            log_providers: Vec::new(),
            error_providers: Vec::new(),
            fatal_providers: Vec::new(),
            debug_providers: Vec::new(),
            level: Level::ERROR,
            formatter,
        }
    }

    /// Builds a dispatcher from configuration.
    ///
    /// The providers are registered first, then the configured level and
    /// subscriptions are applied. Subscriptions naming a provider that is not
    /// in `providers` are dropped.
    pub fn from_config<I>(config: &Config, providers: I) -> Result<Self>
    where
        I: IntoIterator<Item = Box<dyn Provider>>,
    {
        let level = config.level()?;

        let mut formatter = MessageFormatter::new();
        if let Some(hostname) = &config.hostname {
            formatter = formatter.with_hostname(hostname.clone());
        }

        let mut logger = Self::with_formatter(formatter);
        for provider in providers {
            logger.register_boxed(provider);
        }
        logger.set_level(level);
        for severity in Severity::ALL {
            logger.subscribe(severity, config.subscriptions.for_severity(severity));
        }
        Ok(logger)
    }

    pub fn set_level(&mut self, level: impl Into<Level>) {
        self.level = level.into();
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn formatter(&self) -> &MessageFormatter {
        &self.formatter
    }

    /// Whether a message of this severity would be formatted and dispatched.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity
            .required_level()
            .map_or(true, |required| self.level >= required)
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Registers a provider under its own id. A provider already registered
    /// under the same id is replaced.
    pub fn register_provider<P: Provider + 'static>(&mut self, provider: P) {
        self.register_boxed(Box::new(provider));
    }

    pub fn register_boxed(&mut self, provider: Box<dyn Provider>) {
        let id = provider.id().to_string();
        if self.providers.insert(id.clone(), provider).is_some() {
            debug!(provider = %id, "Replaced previously registered provider");
        }
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    pub fn add_log_provider<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.subscribe(Severity::Log, ids);
    }

    pub fn add_error_provider<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.subscribe(Severity::Error, ids);
    }

    pub fn add_fatal_provider<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.subscribe(Severity::Fatal, ids);
    }

    pub fn add_debug_provider<I>(&mut self, ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.subscribe(Severity::Debug, ids);
    }

    /// Appends each registered id to the severity's subscriber list, keeping
    /// first-seen order and skipping ids already present. Unregistered ids
    /// are ignored.
    pub fn subscribe<I>(&mut self, severity: Severity, ids: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for id in ids {
            let id = id.as_ref();
            let Some(provider) = self.providers.get(id) else {
                debug!(provider = id, %severity, "Ignoring subscription for unregistered provider");
                continue;
            };
            let provider_id = provider.id().to_string();
            let list = self.subscriptions_mut(severity);
            if !list.contains(&provider_id) {
                list.push(provider_id);
            }
        }
    }

    /// The subscriber ids for a severity, in dispatch order.
    pub fn subscribers(&self, severity: Severity) -> &[String] {
        match severity {
            Severity::Log => &self.log_providers,
            Severity::Error => &self.error_providers,
            Severity::Fatal => &self.fatal_providers,
            Severity::Debug => &self.debug_providers,
        }
    }

    fn subscriptions_mut(&mut self, severity: Severity) -> &mut Vec<String> {
        match severity {
            Severity::Log => &mut self.log_providers,
            Severity::Error => &mut self.error_providers,
            Severity::Fatal => &mut self.fatal_providers,
            Severity::Debug => &mut self.debug_providers,
        }
    }

    // =========================================================================
    // Logging
    // =========================================================================

    /// Dispatches to `log` subscribers. No-op below [`Level::INFO`].
    #[track_caller]
    pub fn log(&self, parts: &[Part]) {
        self.emit(Severity::Log, parts, CallSite::caller());
    }

    #[track_caller]
    pub fn logf(&self, args: fmt::Arguments<'_>) {
        if self.is_enabled(Severity::Log) {
            self.log(&[Part::from(args.to_string())]);
        }
    }

    /// Dispatches to `error` subscribers at every level.
    #[track_caller]
    pub fn error(&self, parts: &[Part]) {
        self.emit(Severity::Error, parts, CallSite::caller());
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.error(&[Part::from(args.to_string())]);
    }

    /// Dispatches to `debug` subscribers. No-op below [`Level::DEBUG`].
    #[track_caller]
    pub fn debug(&self, parts: &[Part]) {
        self.emit(Severity::Debug, parts, CallSite::caller());
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        if self.is_enabled(Severity::Debug) {
            self.debug(&[Part::from(args.to_string())]);
        }
    }

    /// Dispatches to every `fatal` subscriber in order, then exits the process
    /// with status 1. Exits even when nobody is subscribed.
    #[track_caller]
    pub fn fatal(&self, parts: &[Part]) -> ! {
        self.emit(Severity::Fatal, parts, CallSite::caller());
        debug!("Fatal message dispatched, exiting with status 1");
        std::process::exit(1)
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(&[Part::from(args.to_string())])
    }

    /// Gates, formats and fans out one message. Never exits; [`fatal`](Self::fatal)
    /// owns process termination.
    pub(crate) fn emit(&self, severity: Severity, parts: &[Part], site: CallSite<'_>) {
        if !self.is_enabled(severity) {
            return;
        }
        let msg = self.formatter.format(severity, parts, site);
        for id in self.subscribers(severity) {
            match self.providers.get(id) {
                Some(provider) => deliver(provider.as_ref(), severity, &msg),
                None => trace!(provider = %id, %severity, "Skipping missing provider"),
            }
        }
    }
}

fn deliver(provider: &dyn Provider, severity: Severity, msg: &[u8]) {
    match severity {
        Severity::Log => provider.log(msg),
        Severity::Error => provider.error(msg),
        Severity::Fatal => provider.fatal(msg),
        Severity::Debug => provider.debug(msg),
    }
}

/// Formats with [`format_args!`] and dispatches on the `log` channel.
///
/// ```
/// let logger = fanlog::Logger::new();
/// fanlog::logf!(logger, "{} of {} shards ready", 3, 8);
/// ```
#[macro_export]
macro_rules! logf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.logf(::std::format_args!($($arg)+))
    };
}

/// Formats with [`format_args!`] and dispatches on the `error` channel.
#[macro_export]
macro_rules! errorf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::std::format_args!($($arg)+))
    };
}

/// Formats with [`format_args!`] and dispatches on the `debug` channel.
#[macro_export]
macro_rules! debugf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::std::format_args!($($arg)+))
    };
}

/// Formats with [`format_args!`], dispatches on the `fatal` channel and exits.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::std::format_args!($($arg)+))
    };
}
