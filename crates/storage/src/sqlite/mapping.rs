use serde::{Deserialize, Serialize};
use sqlx::Row;

use hub_core::model::{ProgressRecord, Question, QuestionId, StudentId, Topic, TopicId};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Persisted JSON shape of one question inside a topic row.
///
/// Field names follow the stored document (`correctAnswer` camelCase), so
/// rows written by earlier front ends keep deserializing.
#[derive(Debug, Serialize, Deserialize)]
struct QuestionRow {
    id: String,
    question: String,
    options: Vec<String>,
    #[serde(rename = "correctAnswer")]
    correct_answer: usize,
}

pub(crate) fn questions_to_json(questions: &[Question]) -> Result<String, StorageError> {
    let rows: Vec<QuestionRow> = questions
        .iter()
        .map(|q| QuestionRow {
            id: q.id().as_str().to_owned(),
            question: q.prompt().to_owned(),
            options: q.options().to_vec(),
            correct_answer: q.correct_answer(),
        })
        .collect();
    serde_json::to_string(&rows).map_err(ser)
}

pub(crate) fn questions_from_json(json: &str) -> Result<Vec<Question>, StorageError> {
    let rows: Vec<QuestionRow> = serde_json::from_str(json).map_err(ser)?;
    rows.into_iter()
        .map(|row| {
            Question::from_persisted(
                QuestionId::new(row.id),
                row.question,
                row.options,
                row.correct_answer,
            )
            .map_err(ser)
        })
        .collect()
}

pub(crate) fn map_topic_row(row: &sqlx::sqlite::SqliteRow) -> Result<Topic, StorageError> {
    let questions_json: String = row.try_get("questions").map_err(ser)?;
    let questions = questions_from_json(&questions_json)?;

    Ok(Topic::from_persisted(
        TopicId::new(row.try_get::<String, _>("id").map_err(ser)?),
        row.try_get("title").map_err(ser)?,
        row.try_get("description").map_err(ser)?,
        row.try_get("content").map_err(ser)?,
        row.try_get("example").map_err(ser)?,
        questions,
        row.try_get("created_at").map_err(ser)?,
    ))
}

pub(crate) fn score_from_i64(value: Option<i64>) -> Result<Option<u8>, StorageError> {
    value
        .map(|v| {
            u8::try_from(v)
                .ok()
                .filter(|s| *s <= 100)
                .ok_or_else(|| StorageError::Serialization(format!("invalid score: {v}")))
        })
        .transpose()
}

pub(crate) fn map_progress_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<ProgressRecord, StorageError> {
    Ok(ProgressRecord {
        user_id: StudentId::new(row.try_get::<String, _>("user_id").map_err(ser)?),
        topic_id: TopicId::new(row.try_get::<String, _>("topic_id").map_err(ser)?),
        completed: row.try_get("completed").map_err(ser)?,
        score: score_from_i64(row.try_get("score").map_err(ser)?)?,
        completed_at: row.try_get("completed_at").map_err(ser)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::model::QuestionDraft;

    fn question(id: &str, correct: usize) -> Question {
        QuestionDraft {
            id: QuestionId::new(id),
            prompt: "Which tag creates a table row?".to_string(),
            options: vec![
                "<td>".to_string(),
                "<tr>".to_string(),
                "<table>".to_string(),
                "<th>".to_string(),
            ],
            correct_answer: correct,
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn question_json_uses_camel_case_correct_answer() {
        let json = questions_to_json(&[question("q1", 1)]).unwrap();
        assert!(json.contains("\"correctAnswer\":1"), "json was: {json}");
    }

    #[test]
    fn question_json_round_trips() {
        let original = vec![question("q1", 1), question("q2", 3)];
        let json = questions_to_json(&original).unwrap();
        let parsed = questions_from_json(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn corrupt_correct_answer_is_a_serialization_error() {
        let json = r#"[{"id":"q1","question":"Q","options":["a","b","c","d"],"correctAnswer":9}]"#;
        let err = questions_from_json(json).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[test]
    fn score_out_of_range_is_rejected() {
        assert!(score_from_i64(Some(101)).is_err());
        assert!(score_from_i64(Some(-1)).is_err());
        assert_eq!(score_from_i64(Some(70)).unwrap(), Some(70));
        assert_eq!(score_from_i64(None).unwrap(), None);
    }
}
