//! Store error types
//!
//! Error codes:
//! - PAPER_STORE_IO_ERROR (ERROR severity)
//! - PAPER_STORE_WRITE_FAILED (ERROR severity)
//! - PAPER_STORE_READ_FAILED (ERROR severity)
//! - PAPER_STORE_CORRUPTION (FATAL severity)
//!
//! Persistence failures surface to the caller as server-side errors. The
//! store never swallows a failed write and never retries on its own.

use std::fmt;
use std::io;

/// Severity levels for store errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, process continues
    Error,
    /// Durable state is unreliable; the process must stop
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Store-specific error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Disk or lock failure outside a specific read/write
    IoError,
    /// Submission write or fsync failed
    WriteFailed,
    /// Submission read failed
    ReadFailed,
    /// Record checksum or framing failure
    Corruption,
}

impl StoreErrorCode {
    /// Returns the string code.
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::IoError => "PAPER_STORE_IO_ERROR",
            StoreErrorCode::WriteFailed => "PAPER_STORE_WRITE_FAILED",
            StoreErrorCode::ReadFailed => "PAPER_STORE_READ_FAILED",
            StoreErrorCode::Corruption => "PAPER_STORE_CORRUPTION",
        }
    }

    /// Returns the severity level for this code.
    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::Corruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with message, optional context, and optional I/O source.
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StoreError {
    /// Creates an I/O error outside a specific read or write.
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StoreErrorCode::IoError,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Creates a write-failed error.
    pub fn write_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StoreErrorCode::WriteFailed,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Creates a read-failed error.
    pub fn read_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            code: StoreErrorCode::ReadFailed,
            message: message.into(),
            details: None,
            source: Some(source),
        }
    }

    /// Creates a corruption error (FATAL).
    pub fn corruption(message: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::Corruption,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Creates a corruption error with the byte offset of the bad record.
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::Corruption,
            message: reason.into(),
            details: Some(format!("byte_offset: {}", offset)),
            source: None,
        }
    }

    /// Creates a corruption error naming the affected submission.
    pub fn corruption_for_paper(paper_id: &str, reason: impl Into<String>) -> Self {
        Self {
            code: StoreErrorCode::Corruption,
            message: reason.into(),
            details: Some(format!("paper_id: {}", paper_id)),
            source: None,
        }
    }

    /// Creates the error reported when the store mutex was poisoned by a
    /// panicked writer.
    pub fn lock_poisoned() -> Self {
        Self {
            code: StoreErrorCode::IoError,
            message: "store lock poisoned by a panicked writer".into(),
            details: None,
            source: None,
        }
    }

    /// Returns the error code.
    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    /// Returns the severity level.
    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns additional context, if any.
    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether this error requires the process to stop.
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
