//! Durable submission store
//!
//! Maps each paper identifier to its latest accepted submission, backed by
//! the append-only log. The in-memory view is rebuilt from a full scan at
//! open (latest record wins) and maintained on every write.
//!
//! Concurrency: one mutex serializes writes and snapshot reads. That is
//! coarser than per-identifier serialization but matches the single-writer
//! log underneath, and it guarantees a reader observes either the fully-old
//! or fully-new record for an identifier, never a torn write. Callers block
//! only to wait their turn; there is no queuing beyond the callers
//! themselves, and no timeout or cancellation at this layer.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::reader::LogReader;
use super::submission::Submission;
use super::writer::LogWriter;

struct StoreInner {
    writer: LogWriter,
    /// Latest submission per identifier
    live: HashMap<String, Submission>,
}

/// Key-addressed, last-write-wins submission store.
///
/// The store does not validate payloads; callers validate first.
pub struct SubmissionStore {
    inner: Mutex<StoreInner>,
}

impl SubmissionStore {
    /// Opens the store under the given data directory, replaying the log to
    /// rebuild the latest-submission index.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let writer = LogWriter::open(data_dir)?;
        let live = if writer.current_offset() == 0 {
            HashMap::new()
        } else {
            Self::replay(writer.path())?
        };
        Ok(Self {
            inner: Mutex::new(StoreInner { writer, live }),
        })
    }

    fn replay(path: &Path) -> StoreResult<HashMap<String, Submission>> {
        let mut live = HashMap::new();
        let mut reader = LogReader::open(path)?;
        while let Some(record) = reader.read_next()? {
            let submission = Submission::from_record(&record)?;
            // Later records replace earlier ones for the same identifier
            live.insert(submission.paper_id.clone(), submission);
        }
        Ok(live)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, StoreInner>> {
        self.inner.lock().map_err(|_| StoreError::lock_poisoned())
    }

    /// Inserts or replaces the submission for an identifier.
    ///
    /// Atomic per identifier: the durable append and the index update happen
    /// under the store lock, so no reader observes a partial replacement.
    pub fn upsert(
        &self,
        paper_id: &str,
        submitted_at: DateTime<Utc>,
        payload: &Value,
    ) -> StoreResult<()> {
        let submission = Submission::new(paper_id, submitted_at, payload.clone());
        let record = submission.to_record()?;
        let mut inner = self.lock()?;
        inner.writer.append(&record)?;
        inner.live.insert(submission.paper_id.clone(), submission);
        Ok(())
    }

    /// Returns the latest submission for an identifier, if any.
    pub fn get(&self, paper_id: &str) -> StoreResult<Option<Submission>> {
        let inner = self.lock()?;
        Ok(inner.live.get(paper_id).cloned())
    }

    /// Returns every current submission in archive order: submitted_at
    /// descending, ties by paper_id ascending.
    pub fn list_all(&self) -> StoreResult<Vec<Submission>> {
        let snapshot: Vec<Submission> = {
            let inner = self.lock()?;
            inner.live.values().cloned().collect()
        };
        let mut archive = snapshot;
        archive.sort_by(|a, b| a.archive_cmp(b));
        Ok(archive)
    }

    /// Returns the number of distinct identifiers currently stored.
    pub fn count(&self) -> StoreResult<usize> {
        let inner = self.lock()?;
        Ok(inner.live.len())
    }
}
