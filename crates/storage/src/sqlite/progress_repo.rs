use hub_core::model::{ProgressRecord, StudentId, TopicId};

use super::{SqliteRepository, mapping::map_progress_row};
use crate::repository::{ProgressRepository, StorageError};

const PROGRESS_COLUMNS: &str = "user_id, topic_id, completed, score, completed_at";

fn execute_error(e: sqlx::Error) -> StorageError {
    if e.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
    {
        StorageError::Conflict
    } else {
        StorageError::Connection(e.to_string())
    }
}

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn progress_for_user(
        &self,
        user_id: &StudentId,
    ) -> Result<Vec<ProgressRecord>, StorageError> {
        let sql = format!("SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_id = ?1");
        let rows = sqlx::query(&sql)
            .bind(user_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(map_progress_row(&row)?);
        }
        Ok(records)
    }

    async fn find_progress(
        &self,
        user_id: &StudentId,
        topic_id: &TopicId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let sql =
            format!("SELECT {PROGRESS_COLUMNS} FROM progress WHERE user_id = ?1 AND topic_id = ?2");
        let row = sqlx::query(&sql)
            .bind(user_id.as_str())
            .bind(topic_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.map(|r| map_progress_row(&r)).transpose()
    }

    async fn insert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO progress (user_id, topic_id, completed, score, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(record.user_id.as_str())
        .bind(record.topic_id.as_str())
        .bind(record.completed)
        .bind(record.score.map(i64::from))
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(execute_error)?;

        Ok(())
    }

    async fn update_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let result = sqlx::query(
            r"
            UPDATE progress
            SET completed = ?3, score = ?4, completed_at = ?5
            WHERE user_id = ?1 AND topic_id = ?2
            ",
        )
        .bind(record.user_id.as_str())
        .bind(record.topic_id.as_str())
        .bind(record.completed)
        .bind(record.score.map(i64::from))
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    // SQLite has a native atomic upsert; no insert-then-update fallback needed.
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO progress (user_id, topic_id, completed, score, completed_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(user_id, topic_id) DO UPDATE SET
                completed = excluded.completed,
                score = excluded.score,
                completed_at = excluded.completed_at
            ",
        )
        .bind(record.user_id.as_str())
        .bind(record.topic_id.as_str())
        .bind(record.completed)
        .bind(record.score.map(i64::from))
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
