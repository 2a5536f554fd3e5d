#![allow(dead_code)]
use fanlog::{Provider, Severity};
use std::sync::{Arc, Mutex};

/// Every delivery seen by any `RecordingProvider` sharing the same journal,
/// in arrival order.
pub type Journal = Arc<Mutex<Vec<Delivery>>>;

#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    pub provider: String,
    pub severity: Severity,
    pub msg: Vec<u8>,
}

impl Delivery {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.msg).into_owned()
    }
}

/// A mock Provider that appends each message it receives to a shared journal.
#[derive(Clone, Debug)]
pub struct RecordingProvider {
    id: String,
    tag: String,
    pub journal: Journal,
}

impl RecordingProvider {
    pub fn new(id: &str, journal: Journal) -> Self {
        Self::tagged(id, id, journal)
    }

    /// A provider registered as `id` that reports itself as `tag` in the
    /// journal, to tell apart two providers sharing an id.
    pub fn tagged(id: &str, tag: &str, journal: Journal) -> Self {
        Self {
            id: id.to_string(),
            tag: tag.to_string(),
            journal,
        }
    }

    fn record(&self, severity: Severity, msg: &[u8]) {
        self.journal.lock().unwrap().push(Delivery {
            provider: self.tag.clone(),
            severity,
            msg: msg.to_vec(),
        });
    }
}

impl Provider for RecordingProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn log(&self, msg: &[u8]) {
        self.record(Severity::Log, msg);
    }

    fn error(&self, msg: &[u8]) {
        self.record(Severity::Error, msg);
    }

    fn fatal(&self, msg: &[u8]) {
        self.record(Severity::Fatal, msg);
    }

    fn debug(&self, msg: &[u8]) {
        self.record(Severity::Debug, msg);
    }
}

/// A mock Provider that writes each message to stdout, one per line.
#[derive(Clone, Debug)]
pub struct StdoutProvider {
    pub id: String,
}

impl StdoutProvider {
    fn print(&self, msg: &[u8]) {
        println!("[{}] {}", self.id, String::from_utf8_lossy(msg));
    }
}

impl Provider for StdoutProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn log(&self, msg: &[u8]) {
        self.print(msg);
    }

    fn error(&self, msg: &[u8]) {
        self.print(msg);
    }

    fn fatal(&self, msg: &[u8]) {
        self.print(msg);
    }

    fn debug(&self, msg: &[u8]) {
        self.print(msg);
    }
}

pub fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn deliveries(journal: &Journal) -> Vec<Delivery> {
    journal.lock().unwrap().clone()
}
