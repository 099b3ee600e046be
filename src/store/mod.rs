//! Submission Store subsystem for paperdb
//!
//! Holds the canonical persistent state of accepted submissions as an
//! append-only record log with no in-place updates.
//!
//! # Design Principles
//!
//! - Append-only; re-submission appends, latest record wins
//! - Checksum-verified on every read, fsync on every write
//! - Last-write-wins per identifier is a documented invariant
//! - One mutex serializes writes and snapshot reads (no torn reads)
//! - The store trusts callers to validate payloads first

mod checksum;
mod errors;
mod reader;
mod record;
mod store;
mod submission;
mod writer;

pub use checksum::{crc32, verify};
pub use errors::{Severity, StoreError, StoreErrorCode, StoreResult};
pub use reader::LogReader;
pub use record::SubmissionRecord;
pub use store::SubmissionStore;
pub use submission::Submission;
pub use writer::LogWriter;
