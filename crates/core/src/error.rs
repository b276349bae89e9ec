use thiserror::Error;

use crate::grading::GradingError;
use crate::model::{QuestionValidationError, TopicValidationError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TopicValidation(#[from] TopicValidationError),
    #[error(transparent)]
    QuestionValidation(#[from] QuestionValidationError),
    #[error(transparent)]
    Grading(#[from] GradingError),
}
