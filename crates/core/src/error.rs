use thiserror::Error;

use crate::model::{
    CategoryError, DifficultyError, ProfileError, QuestionError, SessionResultError,
};

/// Aggregate error for callers that validate several entity kinds at once.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Difficulty(#[from] DifficultyError),
    #[error(transparent)]
    SessionResult(#[from] SessionResultError),
}
