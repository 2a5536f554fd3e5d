// src/formatting.rs

use crate::core::Severity;
use crate::part::Part;
use chrono::{DateTime, FixedOffset, Local, SecondsFormat};
use std::fmt::Write;
use std::panic::Location;
use std::path::Path;
use std::sync::OnceLock;

const SEPARATOR: char = ' ';

/// Where a logging call was made. Only the file's basename is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> CallSite<'a> {
    pub fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// The call site of the nearest caller not marked `#[track_caller]`.
    #[track_caller]
    pub fn caller() -> CallSite<'static> {
        Location::caller().into()
    }

    fn short_file(&self) -> &'a str {
        Path::new(self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.file)
    }
}

impl From<&'static Location<'static>> for CallSite<'static> {
    fn from(location: &'static Location<'static>) -> Self {
        CallSite::new(location.file(), location.line())
    }
}

/// Source of the timestamp stamped on every line.
#[derive(Debug, Clone, Default)]
pub enum Clock {
    /// The local wall clock.
    #[default]
    System,
    /// A pinned instant, for reproducible output.
    Fixed(DateTime<FixedOffset>),
}

impl Clock {
    pub fn now(&self) -> DateTime<FixedOffset> {
        match self {
            Clock::System => Local::now().fixed_offset(),
            Clock::Fixed(at) => *at,
        }
    }
}

/// Builds the canonical byte line handed to every provider.
///
/// A line reads
/// `<TAG>: <rfc3339> <program> <hostname> <file>:<line>: <body>` and never
/// contains a newline byte.
#[derive(Debug)]
pub struct MessageFormatter {
    hostname: OnceLock<String>,
    program: String,
    clock: Clock,
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFormatter {
    /// Creates a formatter for the running process. The hostname is looked
    /// up on the first call to [`format`](Self::format).
    pub fn new() -> Self {
        Self {
            hostname: OnceLock::new(),
            program: program_basename(),
            clock: Clock::System,
        }
    }

    /// Pins the hostname instead of asking the OS.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = OnceLock::from(hostname.into());
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn hostname(&self) -> &str {
        self.hostname.get_or_init(resolve_hostname)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Formats one log event.
    pub fn format(&self, severity: Severity, parts: &[Part], site: CallSite<'_>) -> Vec<u8> {
        let mut body = String::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                body.push(SEPARATOR);
            }
            // Writing to a String cannot fail.
            let _ = write!(body, "{}", part);
        }

        let mut line = format!(
            "{}: {} {} {} {}:{}: {}\n",
            severity.tag(),
            self.clock.now().to_rfc3339_opts(SecondsFormat::Secs, true),
            self.program,
            self.hostname(),
            site.short_file(),
            site.line,
            sanitize_body(&body),
        );
        line.retain(|c| c != '\n');
        line.into_bytes()
    }
}

/// Replaces every carriage return and newline with a tab, in one pass.
pub fn sanitize_body(body: &str) -> String {
    body.replace(['\r', '\n'], "\t")
}

fn program_basename() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn resolve_hostname() -> String {
    let hostname = sysinfo::System::host_name().unwrap_or_default();
    tracing::trace!(%hostname, "Resolved hostname for log lines");
    hostname
}
