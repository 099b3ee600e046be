//! Submission rows and archive ordering
//!
//! A `Submission` is one accepted document under its identifier, plus the
//! acceptance metadata. The identifier uniquely determines the latest
//! Submission: re-submitting the same identifier replaces the prior row
//! entirely (last write wins, no merge). Rows are never deleted here.

use std::cmp::Ordering;
use std::io;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::record::SubmissionRecord;

/// One accepted submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    /// Unique submission identifier
    pub paper_id: String,
    /// Acceptance time, UTC at second precision
    pub submitted_at: DateTime<Utc>,
    /// The accepted document, verbatim
    pub payload: Value,
    /// Acceptance record. Currently identical to the payload; kept distinct
    /// so enrichment can attach to it later.
    pub acceptance: Value,
}

impl Submission {
    /// Creates a submission whose acceptance record mirrors the payload.
    pub fn new(
        paper_id: impl Into<String>,
        submitted_at: DateTime<Utc>,
        payload: Value,
    ) -> Self {
        let acceptance = payload.clone();
        Self {
            paper_id: paper_id.into(),
            submitted_at,
            payload,
            acceptance,
        }
    }

    /// Returns the persisted timestamp form: RFC 3339 UTC, second precision.
    pub fn timestamp(&self) -> String {
        self.submitted_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// Archive ordering: submitted_at descending, ties broken by paper_id
    /// ascending for determinism.
    pub fn archive_cmp(&self, other: &Submission) -> Ordering {
        other
            .submitted_at
            .cmp(&self.submitted_at)
            .then_with(|| self.paper_id.cmp(&other.paper_id))
    }

    /// Frames this submission for the log.
    pub(crate) fn to_record(&self) -> StoreResult<SubmissionRecord> {
        let payload = serde_json::to_vec(&self.payload).map_err(|e| {
            StoreError::write_failed(
                format!("failed to serialize payload for '{}'", self.paper_id),
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })?;
        let acceptance = serde_json::to_vec(&self.acceptance).map_err(|e| {
            StoreError::write_failed(
                format!("failed to serialize acceptance for '{}'", self.paper_id),
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })?;
        Ok(SubmissionRecord {
            paper_id: self.paper_id.clone(),
            submitted_at: self.timestamp(),
            payload,
            acceptance,
        })
    }

    /// Rebuilds a submission from a log record. Unparsable fields mean the
    /// log is unreliable and are reported as corruption.
    pub(crate) fn from_record(record: &SubmissionRecord) -> StoreResult<Self> {
        let submitted_at = DateTime::parse_from_rfc3339(&record.submitted_at)
            .map_err(|e| {
                StoreError::corruption_for_paper(
                    &record.paper_id,
                    format!("unparsable submission timestamp: {}", e),
                )
            })?
            .with_timezone(&Utc);
        let payload: Value = serde_json::from_slice(&record.payload).map_err(|e| {
            StoreError::corruption_for_paper(
                &record.paper_id,
                format!("unparsable payload: {}", e),
            )
        })?;
        let acceptance: Value = serde_json::from_slice(&record.acceptance).map_err(|e| {
            StoreError::corruption_for_paper(
                &record.paper_id,
                format!("unparsable acceptance record: {}", e),
            )
        })?;
        Ok(Self {
            paper_id: record.paper_id.clone(),
            submitted_at,
            payload,
            acceptance,
        })
    }
}
