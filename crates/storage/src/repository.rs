use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use hub_core::model::{ProgressRecord, StudentId, Topic, TopicId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    /// A write collided with an existing row on its unique key.
    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Ordering for the topic catalog; topics are listed by creation time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TopicOrder {
    CreatedAsc,
    /// Newest first; what the dashboards render.
    #[default]
    CreatedDesc,
}

/// Repository contract for the topic catalog.
#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// List all topics in the given creation-time order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the catalog cannot be read.
    async fn list_topics(&self, order: TopicOrder) -> Result<Vec<Topic>, StorageError>;

    /// Fetch a topic by id; `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_topic(&self, id: &TopicId) -> Result<Option<Topic>, StorageError>;

    /// Persist or update a topic.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the topic cannot be stored.
    async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError>;

    /// Delete a topic. Progress rows referencing it are cleaned up by the
    /// store (administrator path only).
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no such topic exists.
    async fn delete_topic(&self, id: &TopicId) -> Result<(), StorageError>;
}

/// Repository contract for progress records, keyed by `(user_id, topic_id)`.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// All progress records for one student.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the records cannot be read.
    async fn progress_for_user(
        &self,
        user_id: &StudentId,
    ) -> Result<Vec<ProgressRecord>, StorageError>;

    /// Fetch the record for one `(user, topic)` pair; `Ok(None)` when absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn find_progress(
        &self,
        user_id: &StudentId,
        topic_id: &TopicId,
    ) -> Result<Option<ProgressRecord>, StorageError>;

    /// Insert a new record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` when a record already exists for the
    /// natural key.
    async fn insert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Update an existing record in place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when no record exists for the key.
    async fn update_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Insert-or-update on the natural key.
    ///
    /// Backends with a native atomic upsert override this. The provided
    /// implementation is the optimistic fallback for stores without one:
    /// insert first, and when a concurrent writer won the race, retry as an
    /// update. The conflict is an internal concurrency detail and is never
    /// surfaced to callers.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if neither the insert nor the update retry
    /// could be completed.
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        match self.insert_progress(record).await {
            Err(StorageError::Conflict) => {
                tracing::warn!(
                    user_id = %record.user_id,
                    topic_id = %record.topic_id,
                    "progress insert raced an existing row, retrying as update"
                );
                self.update_progress(record).await
            }
            other => other,
        }
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Deliberately does not override `upsert_progress`, so the optimistic
/// insert-then-update fallback stays exercised by the test suite.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    topics: Arc<Mutex<HashMap<TopicId, Topic>>>,
    progress: Arc<Mutex<HashMap<(StudentId, TopicId), ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TopicRepository for InMemoryRepository {
    async fn list_topics(&self, order: TopicOrder) -> Result<Vec<Topic>, StorageError> {
        let guard = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut topics: Vec<Topic> = guard.values().cloned().collect();
        topics.sort_by(|a, b| match order {
            TopicOrder::CreatedAsc => a.created_at().cmp(&b.created_at()),
            TopicOrder::CreatedDesc => b.created_at().cmp(&a.created_at()),
        });
        Ok(topics)
    }

    async fn get_topic(&self, id: &TopicId) -> Result<Option<Topic>, StorageError> {
        let guard = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(id).cloned())
    }

    async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        let mut guard = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(topic.id().clone(), topic.clone());
        Ok(())
    }

    async fn delete_topic(&self, id: &TopicId) -> Result<(), StorageError> {
        let mut topics = self
            .topics
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if topics.remove(id).is_none() {
            return Err(StorageError::NotFound);
        }
        // Mirror the SQL backend's ON DELETE CASCADE.
        let mut progress = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        progress.retain(|(_, topic_id), _| topic_id != id);
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn progress_for_user(
        &self,
        user_id: &StudentId,
    ) -> Result<Vec<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .values()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_progress(
        &self,
        user_id: &StudentId,
        topic_id: &TopicId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&(user_id.clone(), topic_id.clone())).cloned())
    }

    async fn insert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let key = (record.user_id.clone(), record.topic_id.clone());
        if guard.contains_key(&key) {
            return Err(StorageError::Conflict);
        }
        guard.insert(key, record.clone());
        Ok(())
    }

    async fn update_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let key = (record.user_id.clone(), record.topic_id.clone());
        if !guard.contains_key(&key) {
            return Err(StorageError::NotFound);
        }
        guard.insert(key, record.clone());
        Ok(())
    }
}

/// Aggregates topic and progress repositories behind trait objects for easy
/// backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub topics: Arc<dyn TopicRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let topics: Arc<dyn TopicRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self { topics, progress }
    }
}
