//! Observability for paperdb
//!
//! Structured, synchronous JSON logging. One event per line, deterministic
//! key ordering, explicit severities.

mod logger;

pub use logger::{log, Severity};
