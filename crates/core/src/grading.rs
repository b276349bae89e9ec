use std::collections::HashMap;
use thiserror::Error;

use crate::model::{Question, QuestionId};

/// Minimum score (percent) required to pass an exam, inclusive.
pub const PASS_THRESHOLD: u8 = 70;

//
// ─── ANSWER SHEET ──────────────────────────────────────────────────────────────
//

/// A student's answer selections for one exam attempt, keyed by question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    selections: HashMap<QuestionId, usize>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or change) the selected option for a question.
    pub fn select(&mut self, question_id: QuestionId, option_index: usize) {
        self.selections.insert(question_id, option_index);
    }

    /// The selected option index for a question, if any.
    #[must_use]
    pub fn selected(&self, question_id: &QuestionId) -> Option<usize> {
        self.selections.get(question_id).copied()
    }

    /// Questions from the given set that have no selection yet, in exam order.
    #[must_use]
    pub fn unanswered(&self, questions: &[Question]) -> Vec<QuestionId> {
        questions
            .iter()
            .filter(|q| !self.selections.contains_key(q.id()))
            .map(|q| q.id().clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

//
// ─── GRADING ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GradingError {
    /// The exam has zero questions; the UI must not offer submission then.
    #[error("exam has no questions")]
    NoQuestions,

    /// The student submitted before answering everything; re-prompt, do not
    /// grade.
    #[error("{} question(s) left unanswered", .unanswered.len())]
    IncompleteSubmission { unanswered: Vec<QuestionId> },
}

/// Result of grading one exam attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExamGrade {
    pub score_percent: u8,
    pub passed: bool,
}

/// Grade an exam attempt against its question set.
///
/// Pure computation, no store access; callers hand the result to the
/// progress reconciler. The score is rounded half-up to the nearest integer
/// percent and the pass threshold is inclusive: 7/10 scores exactly 70 and
/// passes, 2/3 rounds to 67 and fails.
///
/// # Errors
///
/// Returns `GradingError::NoQuestions` for an empty question set and
/// `GradingError::IncompleteSubmission` when any question has no selection.
/// Both are resolved before any store interaction.
pub fn grade(questions: &[Question], answers: &AnswerSheet) -> Result<ExamGrade, GradingError> {
    if questions.is_empty() {
        return Err(GradingError::NoQuestions);
    }

    let unanswered = answers.unanswered(questions);
    if !unanswered.is_empty() {
        return Err(GradingError::IncompleteSubmission { unanswered });
    }

    let correct = questions
        .iter()
        .filter(|q| answers.selected(q.id()) == Some(q.correct_answer()))
        .count();

    let score_percent = score_percent(correct, questions.len());
    Ok(ExamGrade {
        score_percent,
        passed: score_percent >= PASS_THRESHOLD,
    })
}

/// Round-half-up integer percent; `total` is non-zero by the time this runs.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn score_percent(correct: usize, total: usize) -> u8 {
    ((correct as f64 / total as f64) * 100.0).round() as u8
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
