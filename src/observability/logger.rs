//! Structured JSON logger
//!
//! - One log line = one event
//! - Synchronous, unbuffered
//! - Deterministic key ordering: `event`, `severity`, then fields sorted by key
//! - Errors and fatals go to stderr, everything else to stdout

use std::fmt;
use std::io::{self, Write};

use serde_json::{Map, Value};

/// Log severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Normal operations
    Info,
    /// Recoverable issues and rejected client input
    Warn,
    /// Operation failures
    Error,
    /// Unrecoverable, process exits
    Fatal,
}

impl Severity {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emits one structured event line.
pub fn log(severity: Severity, event: &str, fields: &[(&str, String)]) {
    let line = render(severity, event, fields);
    if severity >= Severity::Error {
        write_line(&mut io::stderr(), &line);
    } else {
        write_line(&mut io::stdout(), &line);
    }
}

fn render(severity: Severity, event: &str, fields: &[(&str, String)]) -> String {
    let mut entry = Map::new();
    entry.insert("event".into(), Value::String(event.into()));
    entry.insert("severity".into(), Value::String(severity.as_str().into()));

    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(key, _)| *key);
    for (key, value) in sorted {
        entry.insert((*key).into(), Value::String(value.clone()));
    }

    // Map preserves insertion order, so event and severity always lead
    Value::Object(entry).to_string()
}

fn write_line<W: Write>(writer: &mut W, line: &str) {
    let _ = writer.write_all(line.as_bytes());
    let _ = writer.write_all(b"\n");
    let _ = writer.flush();
}
