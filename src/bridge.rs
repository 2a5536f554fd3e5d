//! Adapter that plugs a [`Logger`] in behind the `log` crate facade.
//!
//! Records from `log::error!` land on the `error` channel, `warn!` and
//! `info!` on `log`, `debug!` and `trace!` on `debug`. Nothing from the
//! facade reaches `fatal`, so a library cannot terminate the process through
//! this path.
//!
//! Records emitted while the bridge is already dispatching on the same
//! thread (a provider that logs through the facade) are dropped.

use crate::core::{Level, Severity};
use crate::error::Result;
use crate::formatting::CallSite;
use crate::logger::Logger;
use crate::part::Part;
use log::{LevelFilter, Metadata, Record};
use std::cell::Cell;
use std::sync::{Arc, PoisonError, RwLock};

thread_local! {
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as dispatching through the bridge until dropped.
struct DispatchGuard;

impl DispatchGuard {
    fn enter() -> Option<Self> {
        DISPATCHING.with(|flag| (!flag.replace(true)).then_some(DispatchGuard))
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        DISPATCHING.with(|flag| flag.set(false));
    }
}

#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Arc<RwLock<Logger>>,
}

impl LogBridge {
    pub fn new(logger: Arc<RwLock<Logger>>) -> Self {
        Self { logger }
    }

    /// Installs the bridge as the global `log` backend and sets the facade's
    /// max level from the dispatcher's current level.
    ///
    /// Later calls to [`Logger::set_level`] are still honoured per record, but
    /// records above the installed max level are filtered by the facade before
    /// they arrive; call [`LogBridge::sync_max_level`] after raising the level.
    pub fn install(self) -> Result<()> {
        let filter = self.max_level();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }

    /// Re-applies the dispatcher's level to the `log` facade.
    pub fn sync_max_level(logger: &RwLock<Logger>) {
        let level = logger.read().unwrap_or_else(PoisonError::into_inner).level();
        log::set_max_level(level_filter_for(level));
    }

    fn max_level(&self) -> LevelFilter {
        let logger = self.logger.read().unwrap_or_else(PoisonError::into_inner);
        level_filter_for(logger.level())
    }
}

/// Maps a facade level onto a dispatcher channel.
pub fn severity_for(level: log::Level) -> Severity {
    match level {
        log::Level::Error => Severity::Error,
        log::Level::Warn | log::Level::Info => Severity::Log,
        log::Level::Debug | log::Level::Trace => Severity::Debug,
    }
}

/// The most verbose facade filter the dispatcher would still act on.
pub fn level_filter_for(level: Level) -> LevelFilter {
    if level >= Level::DEBUG {
        LevelFilter::Trace
    } else if level >= Level::INFO {
        LevelFilter::Info
    } else {
        LevelFilter::Error
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        let logger = self.logger.read().unwrap_or_else(PoisonError::into_inner);
        logger.is_enabled(severity_for(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        let Some(_guard) = DispatchGuard::enter() else {
            return;
        };
        let logger = self.logger.read().unwrap_or_else(PoisonError::into_inner);
        let site = CallSite::new(
            record.file().unwrap_or(record.target()),
            record.line().unwrap_or(0),
        );
        let body = Part::from(record.args().to_string());
        logger.emit(severity_for(record.level()), &[body], site);
    }

    fn flush(&self) {}
}
