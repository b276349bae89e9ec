//! Shared error types for the services crate.

use thiserror::Error;

use hub_core::grading::GradingError;
use hub_core::model::{ProgressRecord, TopicValidationError};
use storage::repository::StorageError;

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    /// A progress write failed. Carries the record the operation meant to
    /// persist so the caller can surface the failure and retry without
    /// re-deriving the merge.
    #[error("failed to persist progress for topic {}", .intended.topic_id)]
    Persistence {
        intended: Box<ProgressRecord>,
        source: StorageError,
    },

    /// A read from the progress store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by the exam submission flow.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExamError {
    #[error(transparent)]
    Grading(#[from] GradingError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Errors emitted by `TopicService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TopicServiceError {
    #[error(transparent)]
    Topic(#[from] TopicValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `DashboardService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DashboardError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
