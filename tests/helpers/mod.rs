#![allow(dead_code)]
pub mod mock_provider;

use chrono::{FixedOffset, TimeZone};
use fanlog::{Clock, Logger, MessageFormatter};

/// A logger whose lines are reproducible: fixed clock, hostname and program.
pub fn pinned_logger() -> Logger {
    let at = FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2025, 7, 5, 10, 30, 0)
        .unwrap();
    Logger::with_formatter(
        MessageFormatter::new()
            .with_hostname("test-host")
            .with_program("fanlog-test")
            .with_clock(Clock::Fixed(at)),
    )
}

/// Routes the crate's own `tracing` diagnostics to the test output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
