//! Sequential log reader with corruption detection
//!
//! Scans the submission log record by record, verifying framing and checksum
//! on every read. Used to rebuild the in-memory index at open and by tests.
//! Any checksum or framing failure is fatal: the log is the durable source of
//! truth and an unreliable log must stop the process.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::errors::{StoreError, StoreResult};
use super::record::{SubmissionRecord, MIN_RECORD_SIZE};

/// Reader over the submission log.
#[derive(Debug)]
pub struct LogReader {
    path: PathBuf,
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl LogReader {
    /// Opens the log file for a sequential scan.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| {
            StoreError::read_failed(
                format!("failed to open submission log '{}'", path.display()),
                e,
            )
        })?;
        let file_size = file
            .metadata()
            .map_err(|e| StoreError::read_failed("failed to read log metadata", e))?
            .len();

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Returns the log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the current scan offset.
    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    /// Reads the next record.
    ///
    /// Returns `Ok(None)` at end of log. Any framing or checksum failure is
    /// reported as corruption at the record's byte offset.
    pub fn read_next(&mut self) -> StoreResult<Option<SubmissionRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption_at_offset(
                self.current_offset,
                format!(
                    "truncated log: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption_at_offset(
                self.current_offset,
                format!("failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 || record_length > remaining {
            return Err(StoreError::corruption_at_offset(
                self.current_offset,
                format!(
                    "record length {} is outside the valid range for {} remaining bytes",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            StoreError::corruption_at_offset(
                self.current_offset,
                format!("failed to read record body: {}", e),
            )
        })?;

        let (record, consumed) = SubmissionRecord::deserialize(&record_buf)
            .map_err(|e| StoreError::corruption_at_offset(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;
        Ok(Some(record))
    }

    /// Reads every remaining record in log order.
    pub fn read_all(&mut self) -> StoreResult<Vec<SubmissionRecord>> {
        let mut records = Vec::new();
        while let Some(record) = self.read_next()? {
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sample_record(paper_id: &str) -> SubmissionRecord {
        SubmissionRecord {
            paper_id: paper_id.into(),
            submitted_at: "2026-08-06T12:00:00Z".into(),
            payload: b"{}".to_vec(),
            acceptance: b"{}".to_vec(),
        }
    }

    fn write_log(path: &Path, records: &[SubmissionRecord]) {
        let mut bytes = Vec::new();
        for record in records {
            bytes.extend_from_slice(&record.serialize());
        }
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn test_scan_reads_records_in_log_order() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("submissions.dat");
        write_log(&path, &[sample_record("first.paper"), sample_record("second.paper")]);

        let mut reader = LogReader::open(&path).unwrap();
        let records = reader.read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].paper_id, "first.paper");
        assert_eq!(records[1].paper_id, "second.paper");
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_empty_log_scans_to_nothing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("submissions.dat");
        fs::write(&path, b"").unwrap();

        let mut reader = LogReader::open(&path).unwrap();
        assert!(reader.read_next().unwrap().is_none());
    }

    #[test]
    fn test_corrupted_record_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("submissions.dat");
        let mut bytes = sample_record("first.paper").serialize();
        let mid = bytes.len() / 2;
        bytes[mid] ^= 0xFF;
        fs::write(&path, bytes).unwrap();

        let mut reader = LogReader::open(&path).unwrap();
        let err = reader.read_all().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_trailing_garbage_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("submissions.dat");
        let mut bytes = sample_record("first.paper").serialize();
        bytes.extend_from_slice(b"junk");
        fs::write(&path, bytes).unwrap();

        let mut reader = LogReader::open(&path).unwrap();
        assert!(reader.read_next().unwrap().is_some());
        assert!(reader.read_next().is_err());
    }

    #[test]
    fn test_missing_file_is_read_failure_not_corruption() {
        let tmp = TempDir::new().unwrap();
        let err = LogReader::open(&tmp.path().join("absent.dat")).unwrap_err();
        assert!(!err.is_fatal());
    }
}
