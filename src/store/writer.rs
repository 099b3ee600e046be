//! Append-only log writer with fsync enforcement
//!
//! All submission writes append to `<data_dir>/data/submissions.dat`. There
//! are no in-place updates: re-submission appends a new record and the latest
//! record for an identifier wins on read. Every append is fsynced before the
//! write is acknowledged.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::SubmissionRecord;

/// Name of the submission log inside the data directory.
const LOG_FILE: &str = "submissions.dat";

/// Writer over the submission log.
pub struct LogWriter {
    path: PathBuf,
    file: File,
    current_offset: u64,
}

impl LogWriter {
    /// Opens or creates the submission log under the given data directory,
    /// creating parent directories as needed.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let log_dir = data_dir.join("data");
        if !log_dir.exists() {
            fs::create_dir_all(&log_dir).map_err(|e| {
                StoreError::write_failed(
                    format!("failed to create data directory '{}'", log_dir.display()),
                    e,
                )
            })?;
        }
        let path = log_dir.join(LOG_FILE);

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StoreError::write_failed(
                    format!("failed to open submission log '{}'", path.display()),
                    e,
                )
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::write_failed("failed to read log metadata", e))?
            .len();

        Ok(Self {
            path,
            file,
            current_offset,
        })
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current end-of-log offset.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Appends one record and fsyncs. Returns the offset the record was
    /// written at. The write is not acknowledged unless the fsync succeeds.
    pub fn append(&mut self, record: &SubmissionRecord) -> StoreResult<u64> {
        let framed = record.serialize();
        let offset = self.current_offset;

        self.file.write_all(&framed).map_err(|e| {
            StoreError::write_failed(
                format!("failed to write submission '{}'", record.paper_id),
                e,
            )
        })?;
        self.file.sync_all().map_err(|e| {
            StoreError::write_failed(
                format!("fsync failed after writing submission '{}'", record.paper_id),
                e,
            )
        })?;

        self.current_offset += framed.len() as u64;
        Ok(offset)
    }
}
