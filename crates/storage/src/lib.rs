#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    AttemptRepository, CategoryRepository, InMemoryRepository, ProfileRepository,
    ProgressRepository, QuestionRepository, Storage, StorageError, WrongNoteRepository,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
