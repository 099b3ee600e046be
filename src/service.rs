//! Submission service boundary
//!
//! The facade a transport layer calls. `submit` takes the raw request body
//! and produces a first-class outcome: accepted with the resolved identifier,
//! rejected with the full ordered violation list, or malformed when the input
//! is not a structured document at all. Malformed input is detected before
//! validation runs and is distinct from a violation list.
//!
//! Validation failure is never an `Err`; only schema compilation at startup
//! and store failures use the error channel.

use std::path::Path;

use chrono::{Timelike, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::ident;
use crate::observability::{self, Severity};
use crate::schema::{ConstraintSchema, SchemaError, Violation};
use crate::store::{StoreError, Submission, SubmissionStore};

/// Errors crossing the service boundary.
///
/// Schema errors only occur during construction; store errors are server-side
/// failures a transport should map to a 5xx-class response.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Schema compilation failed at startup
    #[error("{0}")]
    Schema(#[from] SchemaError),

    /// The persistence layer failed
    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Outcome of one submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// Document conformed and was durably stored
    Accepted {
        /// Resolved submission identifier
        paper_id: String,
    },
    /// Document violated the schema; nothing was stored
    Rejected {
        /// Every violation, sorted by path
        violations: Vec<Violation>,
    },
    /// Input could not be parsed into a document; nothing was validated
    Malformed {
        /// Parser diagnostic
        reason: String,
    },
}

/// The submission pipeline: compiled schema plus durable store.
pub struct SubmissionService {
    schema: ConstraintSchema,
    store: SubmissionStore,
}

impl SubmissionService {
    /// Opens a service with the embedded default paper schema.
    ///
    /// Refuses to start if the schema does not compile or the store cannot
    /// be opened.
    pub fn open(data_dir: &Path) -> Result<Self, ServiceError> {
        Self::with_schema(ConstraintSchema::paper_v1()?, data_dir)
    }

    /// Opens a service with a caller-provided compiled schema.
    pub fn with_schema(
        schema: ConstraintSchema,
        data_dir: &Path,
    ) -> Result<Self, ServiceError> {
        let store = SubmissionStore::open(data_dir)?;
        observability::log(
            Severity::Info,
            "store_opened",
            &[("submissions", store.count()?.to_string())],
        );
        Ok(Self { schema, store })
    }

    /// Handles one raw submission.
    ///
    /// Returns `Ok` for all client-attributable outcomes; `Err` only when
    /// the store itself fails.
    pub fn submit(&self, raw: &str) -> Result<SubmitOutcome, ServiceError> {
        let document: Value = match serde_json::from_str(raw) {
            Ok(document) => document,
            Err(parse_error) => {
                let reason = parse_error.to_string();
                observability::log(
                    Severity::Warn,
                    "submission_malformed",
                    &[("reason", reason.clone())],
                );
                return Ok(SubmitOutcome::Malformed { reason });
            }
        };

        let violations = self.schema.validate(&document);
        if !violations.is_empty() {
            observability::log(
                Severity::Warn,
                "submission_rejected",
                &[("violations", violations.len().to_string())],
            );
            return Ok(SubmitOutcome::Rejected { violations });
        }

        let candidate = document
            .pointer("/paper/paper_id")
            .and_then(Value::as_str);
        let paper_id = ident::resolve(candidate);

        // Acceptance time at second precision, matching the persisted form
        let now = Utc::now();
        let submitted_at = now.with_nanosecond(0).unwrap_or(now);

        self.store.upsert(&paper_id, submitted_at, &document)?;
        observability::log(
            Severity::Info,
            "submission_accepted",
            &[("paper_id", paper_id.clone())],
        );
        Ok(SubmitOutcome::Accepted { paper_id })
    }

    /// Returns the archive: every current submission, most recent first.
    pub fn list_archive(&self) -> Result<Vec<Submission>, ServiceError> {
        Ok(self.store.list_all()?)
    }

    /// Returns the compiled schema in use.
    pub fn schema(&self) -> &ConstraintSchema {
        &self.schema
    }
}
