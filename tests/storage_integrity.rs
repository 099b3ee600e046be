//! Storage integrity tests
//!
//! The submission log is the durable source of truth:
//! - Records round-trip byte for byte through the log
//! - Every read verifies the CRC; corruption is fatal
//! - Reopen rebuilds the same state the writer left behind

use std::fs;

use paperdb::store::{LogReader, LogWriter, SubmissionRecord};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn record(paper_id: &str, payload: &str) -> SubmissionRecord {
    SubmissionRecord {
        paper_id: paper_id.into(),
        submitted_at: "2026-08-06T09:30:00Z".into(),
        payload: payload.as_bytes().to_vec(),
        acceptance: payload.as_bytes().to_vec(),
    }
}

// =============================================================================
// Round Trips
// =============================================================================

#[test]
fn test_single_record_round_trips_through_log() {
    let tmp = TempDir::new().unwrap();
    let written = record("agents.2026.0001", r#"{"paper":{}}"#);

    let mut writer = LogWriter::open(tmp.path()).unwrap();
    writer.append(&written).unwrap();

    let mut reader = LogReader::open(writer.path()).unwrap();
    let read_back = reader.read_next().unwrap().unwrap();
    assert_eq!(read_back, written);
    assert!(reader.read_next().unwrap().is_none());
}

#[test]
fn test_many_records_preserve_log_order() {
    let tmp = TempDir::new().unwrap();
    let mut writer = LogWriter::open(tmp.path()).unwrap();
    for index in 0..20 {
        writer
            .append(&record(
                &format!("paper.{:04}", index),
                &format!(r#"{{"n":{}}}"#, index),
            ))
            .unwrap();
    }

    let mut reader = LogReader::open(writer.path()).unwrap();
    let records = reader.read_all().unwrap();
    assert_eq!(records.len(), 20);
    for (index, record) in records.iter().enumerate() {
        assert_eq!(record.paper_id, format!("paper.{:04}", index));
    }
}

// =============================================================================
// Corruption Detection
// =============================================================================

#[test]
fn test_flipped_byte_fails_the_scan() {
    let tmp = TempDir::new().unwrap();
    let mut writer = LogWriter::open(tmp.path()).unwrap();
    writer.append(&record("agents.2026.0001", "{}")).unwrap();
    let path = writer.path().to_path_buf();
    drop(writer);

    let mut bytes = fs::read(&path).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x01;
    fs::write(&path, bytes).unwrap();

    let mut reader = LogReader::open(&path).unwrap();
    let err = reader.read_next().unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.code().code(), "PAPER_STORE_CORRUPTION");
}

#[test]
fn test_truncated_tail_fails_the_scan() {
    let tmp = TempDir::new().unwrap();
    let mut writer = LogWriter::open(tmp.path()).unwrap();
    writer.append(&record("agents.2026.0001", "{}")).unwrap();
    writer.append(&record("agents.2026.0002", "{}")).unwrap();
    let path = writer.path().to_path_buf();
    drop(writer);

    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() - 5]).unwrap();

    let mut reader = LogReader::open(&path).unwrap();
    assert!(reader.read_next().unwrap().is_some());
    assert!(reader.read_next().is_err());
}

// =============================================================================
// Reopen
// =============================================================================

#[test]
fn test_reopened_writer_appends_after_existing_records() {
    let tmp = TempDir::new().unwrap();
    {
        let mut writer = LogWriter::open(tmp.path()).unwrap();
        writer.append(&record("agents.2026.0001", "{}")).unwrap();
    }
    {
        let mut writer = LogWriter::open(tmp.path()).unwrap();
        assert!(writer.current_offset() > 0);
        writer.append(&record("agents.2026.0002", "{}")).unwrap();
    }

    let tmp_path = tmp.path().join("data").join("submissions.dat");
    let mut reader = LogReader::open(&tmp_path).unwrap();
    let records = reader.read_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].paper_id, "agents.2026.0001");
    assert_eq!(records[1].paper_id, "agents.2026.0002");
}
