use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::grading::PASS_THRESHOLD;
use crate::model::ids::{StudentId, TopicId};

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// Per-student, per-topic progress state.
///
/// At most one record exists per `(user_id, topic_id)` pair; that pair is the
/// natural key for upserts. Only the latest exam attempt's score is retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub user_id: StudentId,
    pub topic_id: TopicId,
    pub completed: bool,
    pub score: Option<u8>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    /// A not-yet-started record for the given key.
    #[must_use]
    pub fn fresh(user_id: StudentId, topic_id: TopicId) -> Self {
        Self {
            user_id,
            topic_id,
            completed: false,
            score: None,
            completed_at: None,
        }
    }

    /// True when an exam score is present and meets the pass threshold.
    #[must_use]
    pub fn passed_exam(&self) -> bool {
        self.score.is_some_and(|s| s >= PASS_THRESHOLD)
    }

    /// Recency used to order competing writes for the same key.
    ///
    /// Records that never carried a timestamp sort before any stamped one.
    #[must_use]
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

//
// ─── PROGRESS SET ──────────────────────────────────────────────────────────────
//

/// A student's progress records, keyed by topic.
///
/// Replaces the free-form topic-id-to-fields dictionary the UI used to hold
/// with a typed collection and a pure lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSet {
    records: HashMap<TopicId, ProgressRecord>,
}

impl ProgressSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from an authoritative load, newest record winning on
    /// duplicate keys.
    #[must_use]
    pub fn from_records(records: Vec<ProgressRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.apply(record);
        }
        set
    }

    /// Pure lookup by topic.
    #[must_use]
    pub fn get(&self, topic_id: &TopicId) -> Option<&ProgressRecord> {
        self.records.get(topic_id)
    }

    /// Apply a record, discarding it when it is staler than what is already
    /// held for the same topic.
    ///
    /// This is the guard against a superseded in-flight response arriving
    /// after a newer result was applied: ties and newer recency replace,
    /// older recency is dropped. Returns whether the record was applied.
    pub fn apply(&mut self, record: ProgressRecord) -> bool {
        if let Some(current) = self.records.get(&record.topic_id) {
            if record.recency() < current.recency() {
                return false;
            }
        }
        self.records.insert(record.topic_id.clone(), record);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProgressRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
