//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{CategoryError, ProfileError, QuestionError, SessionResultError};
use storage::repository::StorageError;

/// Errors emitted by the session core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session has not been started")]
    NotStarted,
    #[error("session was already started")]
    AlreadyStarted,
    #[error("session already completed")]
    Completed,
    #[error("session was abandoned")]
    Abandoned,
    #[error("option index {index} is out of range for {option_count} options")]
    InvalidOption { index: usize, option_count: usize },
    #[error(transparent)]
    Result(#[from] SessionResultError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuestionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionServiceError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CategoryService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CategoryServiceError {
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `StatsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StatsServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `WrongNoteService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WrongNoteServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
