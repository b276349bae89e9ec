use hub_core::model::{Topic, TopicId};

use super::{SqliteRepository, mapping};
use crate::repository::{StorageError, TopicOrder, TopicRepository};

const TOPIC_COLUMNS: &str = "id, title, description, content, example, questions, created_at";

#[async_trait::async_trait]
impl TopicRepository for SqliteRepository {
    async fn list_topics(&self, order: TopicOrder) -> Result<Vec<Topic>, StorageError> {
        let sql = match order {
            TopicOrder::CreatedAsc => format!(
                "SELECT {TOPIC_COLUMNS} FROM topics ORDER BY created_at ASC, id ASC"
            ),
            TopicOrder::CreatedDesc => format!(
                "SELECT {TOPIC_COLUMNS} FROM topics ORDER BY created_at DESC, id DESC"
            ),
        };

        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut topics = Vec::with_capacity(rows.len());
        for row in rows {
            topics.push(mapping::map_topic_row(&row)?);
        }
        Ok(topics)
    }

    async fn get_topic(&self, id: &TopicId) -> Result<Option<Topic>, StorageError> {
        let sql = format!("SELECT {TOPIC_COLUMNS} FROM topics WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|r| mapping::map_topic_row(&r)).transpose()
    }

    async fn upsert_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO topics (id, title, description, content, example, questions, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                -- keep created_at from the original insert; only update mutable fields
                title = excluded.title,
                description = excluded.description,
                content = excluded.content,
                example = excluded.example,
                questions = excluded.questions
            ",
        )
        .bind(topic.id().as_str())
        .bind(topic.title())
        .bind(topic.description())
        .bind(topic.content())
        .bind(topic.example())
        .bind(mapping::questions_to_json(topic.questions())?)
        .bind(topic.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn delete_topic(&self, id: &TopicId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM topics WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
