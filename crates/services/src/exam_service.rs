use hub_core::grading::{AnswerSheet, ExamGrade, grade};
use hub_core::identity::StudentIdentity;
use hub_core::model::{ProgressRecord, Topic, TopicId};

use crate::error::ExamError;
use crate::progress_service::ProgressService;

/// Result of a persisted exam submission: the grade plus the merged record
/// the store now holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamOutcome {
    pub grade: ExamGrade,
    pub record: ProgressRecord,
}

/// Coordinates the student-facing exam and completion actions.
#[derive(Clone)]
pub struct ExamService {
    progress: ProgressService,
}

impl ExamService {
    #[must_use]
    pub fn new(progress: ProgressService) -> Self {
        Self { progress }
    }

    /// Grade a submission and persist the result.
    ///
    /// Grading runs first and fails fast: an incomplete submission or an
    /// empty question set never reaches the store. The attempt is evaluated
    /// against the topic snapshot the caller loaded at exam start.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Grading` for submission errors and
    /// `ExamError::Progress` if persisting the result fails (the error
    /// carries the intended record for retry).
    pub async fn submit_exam(
        &self,
        student: &StudentIdentity,
        topic: &Topic,
        answers: &AnswerSheet,
    ) -> Result<ExamOutcome, ExamError> {
        let grade = grade(topic.questions(), answers)?;

        let record = self
            .progress
            .apply_exam_result(student.progress_key(), topic.id(), grade.score_percent)
            .await?;

        Ok(ExamOutcome { grade, record })
    }

    /// Mark a topic's content as worked through.
    ///
    /// # Errors
    ///
    /// Returns `ExamError::Progress` if the write fails.
    pub async fn mark_complete(
        &self,
        student: &StudentIdentity,
        topic_id: &TopicId,
    ) -> Result<ProgressRecord, ExamError> {
        let record = self
            .progress
            .apply_completion(student.progress_key(), topic_id)
            .await?;
        Ok(record)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
