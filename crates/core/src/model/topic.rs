use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{QuestionId, TopicId};

/// Every exam question carries exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Authoring-time shape of an exam question.
///
/// Drafts may hold blank prompts and blank options while the form is being
/// filled in; `TopicDraft::validate` drops blank-prompt drafts at save time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

impl QuestionDraft {
    /// True when the prompt is empty or whitespace-only.
    ///
    /// Blank-prompt drafts are not exam-ready and are filtered out when the
    /// parent topic is saved, never rejected as an error.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.prompt.trim().is_empty()
    }

    /// Validate the draft into an exam-ready `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionValidationError` if the prompt is blank, the option
    /// count is wrong, or `correct_answer` does not index into the options.
    pub fn validate(self) -> Result<Question, QuestionValidationError> {
        if self.is_blank() {
            return Err(QuestionValidationError::BlankPrompt { id: self.id });
        }
        if self.options.len() != OPTION_COUNT {
            return Err(QuestionValidationError::WrongOptionCount {
                id: self.id,
                found: self.options.len(),
            });
        }
        if self.correct_answer >= self.options.len() {
            return Err(QuestionValidationError::CorrectAnswerOutOfRange {
                id: self.id,
                index: self.correct_answer,
                len: self.options.len(),
            });
        }

        Ok(Question {
            id: self.id,
            prompt: self.prompt,
            options: self.options,
            correct_answer: self.correct_answer,
        })
    }
}

/// A validated multiple-choice question.
///
/// Invariant: `correct_answer < options.len()`, enforced at construction.
/// Options may be empty strings; only the prompt must be non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_answer: usize,
}

impl Question {
    /// Rehydrate a question from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `QuestionValidationError` if the stored data violates the
    /// construction invariants (corrupt row).
    pub fn from_persisted(
        id: QuestionId,
        prompt: String,
        options: Vec<String>,
        correct_answer: usize,
    ) -> Result<Self, QuestionValidationError> {
        QuestionDraft {
            id,
            prompt,
            options,
            correct_answer,
        }
        .validate()
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> usize {
        self.correct_answer
    }

    /// True when the selected option index is the correct one.
    #[must_use]
    pub fn is_correct(&self, selected: usize) -> bool {
        selected == self.correct_answer
    }
}

//
// ─── TOPIC TYPES ───────────────────────────────────────────────────────────────
//

/// Authoring-time shape of a topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicDraft {
    pub title: String,
    pub description: String,
    pub content: String,
    pub example: String,
    pub questions: Vec<QuestionDraft>,
}

impl TopicDraft {
    /// Validate the draft into a `Topic`, filtering out questions whose
    /// prompt was left blank in the authoring form.
    ///
    /// # Errors
    ///
    /// Returns `TopicValidationError` if title, description, or content is
    /// blank, or if a kept question fails validation.
    pub fn validate(
        self,
        id: TopicId,
        created_at: DateTime<Utc>,
    ) -> Result<Topic, TopicValidationError> {
        if self.title.trim().is_empty() {
            return Err(TopicValidationError::BlankTitle);
        }
        if self.description.trim().is_empty() {
            return Err(TopicValidationError::BlankDescription);
        }
        if self.content.trim().is_empty() {
            return Err(TopicValidationError::BlankContent);
        }

        let questions = self
            .questions
            .into_iter()
            .filter(|q| !q.is_blank())
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Topic {
            id,
            title: self.title,
            description: self.description,
            content: self.content,
            example: self.example,
            questions,
            created_at,
        })
    }
}

/// Lesson content plus its embedded exam.
///
/// From the student's point of view a topic is an immutable snapshot for the
/// duration of one exam attempt: in-flight answers are graded against the
/// question set that was loaded at exam start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    title: String,
    description: String,
    content: String,
    example: String,
    questions: Vec<Question>,
    created_at: DateTime<Utc>,
}

impl Topic {
    /// Rehydrate a topic from persisted storage; questions are validated
    /// individually by the caller while mapping the row.
    #[must_use]
    pub fn from_persisted(
        id: TopicId,
        title: String,
        description: String,
        content: String,
        example: String,
        questions: Vec<Question>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            content,
            example,
            questions,
            created_at,
        }
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// HTML source of the code example; may be empty.
    #[must_use]
    pub fn example(&self) -> &str {
        &self.example
    }

    /// Questions in authoring order; order drives question numbering.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// True when the topic has at least one exam question.
    ///
    /// The exam tab must not offer submission otherwise.
    #[must_use]
    pub fn has_exam(&self) -> bool {
        !self.questions.is_empty()
    }
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionValidationError {
    #[error("question {id} has a blank prompt")]
    BlankPrompt { id: QuestionId },

    #[error("question {id} has {found} options, expected 4")]
    WrongOptionCount { id: QuestionId, found: usize },

    #[error("question {id} marks option {index} correct but only {len} options exist")]
    CorrectAnswerOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicValidationError {
    #[error("topic title must not be blank")]
    BlankTitle,

    #[error("topic description must not be blank")]
    BlankDescription,

    #[error("topic content must not be blank")]
    BlankContent,

    #[error("invalid question: {0}")]
    Question(#[from] QuestionValidationError),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
