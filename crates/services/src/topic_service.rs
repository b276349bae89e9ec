use std::sync::Arc;

use uuid::Uuid;

use hub_core::model::{Topic, TopicDraft, TopicId};
use hub_core::time::Clock;
use storage::repository::{StorageError, TopicOrder, TopicRepository};

use crate::error::TopicServiceError;

/// Orchestrates topic authoring and catalog access (administrator path).
#[derive(Clone)]
pub struct TopicService {
    clock: Clock,
    topics: Arc<dyn TopicRepository>,
}

impl TopicService {
    #[must_use]
    pub fn new(clock: Clock, topics: Arc<dyn TopicRepository>) -> Self {
        Self { clock, topics }
    }

    /// Validate and persist a new topic.
    ///
    /// Blank-prompt questions from the authoring form are dropped during
    /// validation; the topic gets a fresh id and creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Topic` for validation failures and
    /// `TopicServiceError::Storage` if persistence fails.
    pub async fn create_topic(&self, draft: TopicDraft) -> Result<Topic, TopicServiceError> {
        let id = TopicId::new(Uuid::new_v4().to_string());
        let topic = draft.validate(id, self.clock.now())?;
        self.topics.upsert_topic(&topic).await?;
        Ok(topic)
    }

    /// Re-validate and save an edited topic, preserving its creation time.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Storage` with `StorageError::NotFound`
    /// when the topic does not exist, `TopicServiceError::Topic` for
    /// validation failures, and `TopicServiceError::Storage` if persistence
    /// fails.
    pub async fn update_topic(
        &self,
        id: &TopicId,
        draft: TopicDraft,
    ) -> Result<Topic, TopicServiceError> {
        let existing = self
            .topics
            .get_topic(id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let topic = draft.validate(id.clone(), existing.created_at())?;
        self.topics.upsert_topic(&topic).await?;
        Ok(topic)
    }

    /// List the catalog in the given creation-time order.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Storage` if the catalog cannot be read.
    pub async fn list_topics(&self, order: TopicOrder) -> Result<Vec<Topic>, TopicServiceError> {
        let topics = self.topics.list_topics(order).await?;
        Ok(topics)
    }

    /// Fetch a topic by id; `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Storage` if repository access fails.
    pub async fn get_topic(&self, id: &TopicId) -> Result<Option<Topic>, TopicServiceError> {
        let topic = self.topics.get_topic(id).await?;
        Ok(topic)
    }

    /// Delete a topic; the store cascades the progress cleanup.
    ///
    /// # Errors
    ///
    /// Returns `TopicServiceError::Storage` if the topic is missing or the
    /// delete fails.
    pub async fn delete_topic(&self, id: &TopicId) -> Result<(), TopicServiceError> {
        self.topics.delete_topic(id).await?;
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
