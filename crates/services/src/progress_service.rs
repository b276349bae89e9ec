use std::sync::Arc;

use chrono::{DateTime, Utc};

use hub_core::model::{ProgressRecord, ProgressSet, StudentId, TopicId};
use hub_core::time::Clock;
use storage::repository::ProgressRepository;

use crate::error::ProgressError;

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Reconciles progress changes against the store.
///
/// Every mutation is a read-modify-write on the natural key
/// `(user_id, topic_id)`, persisted as a full upsert. That makes each
/// operation idempotent under retry: a replayed identical submission lands on
/// the same final record instead of duplicating or accumulating.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(clock: Clock, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { clock, progress }
    }

    /// Current time according to the service's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Mark a topic completed without touching exam state.
    ///
    /// An existing exam score survives: only `completed` flips, and
    /// `completed_at` is stamped the first time the record becomes
    /// completed. Creates the record if none exists yet.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the existing record cannot be
    /// read, or `ProgressError::Persistence` (carrying the intended record)
    /// if the write fails.
    pub async fn apply_completion(
        &self,
        user_id: &StudentId,
        topic_id: &TopicId,
    ) -> Result<ProgressRecord, ProgressError> {
        let existing = self.progress.find_progress(user_id, topic_id).await?;

        let mut record = existing
            .unwrap_or_else(|| ProgressRecord::fresh(user_id.clone(), topic_id.clone()));
        record.completed = true;
        if record.completed_at.is_none() {
            record.completed_at = Some(self.clock.now());
        }

        self.persist(record).await
    }

    /// Record the result of an exam attempt.
    ///
    /// Always sets `completed`, overwrites any prior score, and refreshes
    /// `completed_at`. Only the latest attempt is retained; the platform
    /// keeps no attempt history.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the existing record cannot be
    /// read, or `ProgressError::Persistence` (carrying the intended record)
    /// if the write fails.
    pub async fn apply_exam_result(
        &self,
        user_id: &StudentId,
        topic_id: &TopicId,
        score_percent: u8,
    ) -> Result<ProgressRecord, ProgressError> {
        let existing = self.progress.find_progress(user_id, topic_id).await?;

        let mut record = existing
            .unwrap_or_else(|| ProgressRecord::fresh(user_id.clone(), topic_id.clone()));
        record.completed = true;
        record.score = Some(score_percent.min(100));
        record.completed_at = Some(self.clock.now());

        self.persist(record).await
    }

    /// Authoritative reload of a student's records.
    ///
    /// Optimistic local state must be reconciled from this on the next load,
    /// never assumed to match the store.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the records cannot be read.
    pub async fn load(&self, user_id: &StudentId) -> Result<ProgressSet, ProgressError> {
        let records = self.progress.progress_for_user(user_id).await?;
        Ok(ProgressSet::from_records(records))
    }

    async fn persist(&self, record: ProgressRecord) -> Result<ProgressRecord, ProgressError> {
        match self.progress.upsert_progress(&record).await {
            Ok(()) => {
                tracing::debug!(
                    user_id = %record.user_id,
                    topic_id = %record.topic_id,
                    score = ?record.score,
                    "progress upserted"
                );
                Ok(record)
            }
            Err(source) => Err(ProgressError::Persistence {
                intended: Box::new(record),
                source,
            }),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
