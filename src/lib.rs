//! fanlog - a minimal multi-provider logging facade
//!
//! A single [`Logger`] formats each message once and fans it out to the
//! providers subscribed to its severity. Sinks plug in through the
//! [`Provider`] trait; the crate ships none of its own.
pub mod bridge;
pub mod config;
pub mod core;
pub mod error;
pub mod formatting;
pub mod logger;
pub mod part;

// Re-export core types for convenience
pub use crate::core::{Level, Provider, Severity};
pub use bridge::LogBridge;
pub use config::Config;
pub use error::{Error, Result};
pub use formatting::{CallSite, Clock, MessageFormatter};
pub use logger::Logger;
pub use part::Part;
