use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

use quiz_core::model::{
    Category, CategoryId, CategoryProgress, Difficulty, Profile, ProfileId, Question, QuestionId,
    QuizAttempt, WrongNote,
};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── REPOSITORY CONTRACTS ──────────────────────────────────────────────────────
//

/// Repository contract for questions.
///
/// `list_questions` is the session's read path: results are always ordered by
/// prompt text ascending (question id as tie-break) so repeated loads of the
/// same data produce the same sequence, and an empty match is an empty vec,
/// never an error.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persist or update a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the question cannot be stored.
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError>;

    /// Fetch a question by ID. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError>;

    /// List a category's questions, optionally narrowed to one difficulty.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_questions(
        &self,
        category_id: CategoryId,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, StorageError>;

    /// Delete a question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError>;
}

/// Repository contract for categories.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Persist or update a category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the category cannot be stored.
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError>;

    /// Fetch a category by ID. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError>;

    /// List categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    /// Delete a category and all questions it owns.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn delete_category(&self, id: CategoryId) -> Result<(), StorageError>;
}

/// Repository contract for profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist or update a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the profile cannot be stored.
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError>;

    /// Fetch a profile by ID. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>, StorageError>;

    /// List profiles ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_profiles(&self) -> Result<Vec<Profile>, StorageError>;

    /// Delete a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn delete_profile(&self, id: ProfileId) -> Result<(), StorageError>;
}

/// Repository contract for per-question attempt history.
#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// Append a batch of attempt rows (one completed session's records).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the attempts cannot be stored.
    async fn append_attempts(&self, attempts: &[QuizAttempt]) -> Result<(), StorageError>;

    /// List a profile's attempts, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_attempts(&self, profile_id: ProfileId) -> Result<Vec<QuizAttempt>, StorageError>;
}

/// Repository contract for wrong-answer notes.
#[async_trait]
pub trait WrongNoteRepository: Send + Sync {
    /// Append notes produced by a completed session for a profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the notes cannot be stored.
    async fn append_notes(
        &self,
        profile_id: ProfileId,
        notes: &[WrongNote],
    ) -> Result<(), StorageError>;

    /// List a profile's notes, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_notes(&self, profile_id: ProfileId) -> Result<Vec<WrongNote>, StorageError>;

    /// Replace the user memo on a note. The memo is the only mutable field
    /// of a persisted note.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the note does not exist.
    async fn update_memo(&self, note_id: Uuid, memo: &str) -> Result<(), StorageError>;

    /// Delete a note.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the note does not exist.
    async fn delete_note(&self, note_id: Uuid) -> Result<(), StorageError>;
}

/// Repository contract for per-category progress tallies.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch progress for one (profile, category) pair. Returns `Ok(None)`
    /// when nothing was attempted yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn get_progress(
        &self,
        profile_id: ProfileId,
        category_id: CategoryId,
    ) -> Result<Option<CategoryProgress>, StorageError>;

    /// Accumulate one completed session's tallies, creating the row on first
    /// use.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the update cannot be stored.
    async fn record_attempts(
        &self,
        profile_id: ProfileId,
        category_id: CategoryId,
        total: u32,
        correct: u32,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;

    /// List a profile's progress rows.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage failures.
    async fn list_progress(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<CategoryProgress>, StorageError>;
}

//
// ─── IN-MEMORY IMPLEMENTATION ──────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    questions: Arc<Mutex<HashMap<QuestionId, Question>>>,
    categories: Arc<Mutex<HashMap<CategoryId, Category>>>,
    profiles: Arc<Mutex<HashMap<ProfileId, Profile>>>,
    attempts: Arc<Mutex<Vec<QuizAttempt>>>,
    notes: Arc<Mutex<Vec<(ProfileId, WrongNote)>>>,
    progress: Arc<Mutex<HashMap<(ProfileId, CategoryId), CategoryProgress>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock<'a, T>(guard: &'a Arc<Mutex<T>>) -> Result<std::sync::MutexGuard<'a, T>, StorageError> {
        guard
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.questions)?;
        guard.insert(question.id(), question.clone());
        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = Self::lock(&self.questions)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_questions(
        &self,
        category_id: CategoryId,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, StorageError> {
        let guard = Self::lock(&self.questions)?;
        let mut matched: Vec<Question> = guard
            .values()
            .filter(|q| q.category_id() == category_id)
            .filter(|q| difficulty.is_none_or(|d| q.difficulty() == d))
            .cloned()
            .collect();
        matched.sort_by(|a, b| {
            a.prompt()
                .cmp(b.prompt())
                .then_with(|| a.id().value().cmp(&b.id().value()))
        });
        Ok(matched)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.questions)?;
        guard.remove(&id).ok_or(StorageError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.categories)?;
        guard.insert(category.id(), category.clone());
        Ok(())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        let guard = Self::lock(&self.categories)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let guard = Self::lock(&self.categories)?;
        let mut listed: Vec<Category> = guard.values().cloned().collect();
        listed.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(listed)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), StorageError> {
        let mut categories = Self::lock(&self.categories)?;
        categories.remove(&id).ok_or(StorageError::NotFound)?;
        let mut questions = Self::lock(&self.questions)?;
        questions.retain(|_, question| question.category_id() != id);
        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.profiles)?;
        guard.insert(profile.id(), profile.clone());
        Ok(())
    }

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>, StorageError> {
        let guard = Self::lock(&self.profiles)?;
        Ok(guard.get(&id).cloned())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        let guard = Self::lock(&self.profiles)?;
        let mut listed: Vec<Profile> = guard.values().cloned().collect();
        listed.sort_by_key(Profile::created_at);
        Ok(listed)
    }

    async fn delete_profile(&self, id: ProfileId) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.profiles)?;
        guard.remove(&id).ok_or(StorageError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl AttemptRepository for InMemoryRepository {
    async fn append_attempts(&self, attempts: &[QuizAttempt]) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.attempts)?;
        guard.extend_from_slice(attempts);
        Ok(())
    }

    async fn list_attempts(&self, profile_id: ProfileId) -> Result<Vec<QuizAttempt>, StorageError> {
        let guard = Self::lock(&self.attempts)?;
        let mut listed: Vec<QuizAttempt> = guard
            .iter()
            .filter(|attempt| attempt.profile_id == profile_id)
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.attempt_date.cmp(&a.attempt_date));
        Ok(listed)
    }
}

#[async_trait]
impl WrongNoteRepository for InMemoryRepository {
    async fn append_notes(
        &self,
        profile_id: ProfileId,
        notes: &[WrongNote],
    ) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.notes)?;
        guard.extend(notes.iter().map(|note| (profile_id, note.clone())));
        Ok(())
    }

    async fn list_notes(&self, profile_id: ProfileId) -> Result<Vec<WrongNote>, StorageError> {
        let guard = Self::lock(&self.notes)?;
        let mut listed: Vec<WrongNote> = guard
            .iter()
            .filter(|(owner, _)| *owner == profile_id)
            .map(|(_, note)| note.clone())
            .collect();
        listed.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(listed)
    }

    async fn update_memo(&self, note_id: Uuid, memo: &str) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.notes)?;
        let entry = guard
            .iter_mut()
            .find(|(_, note)| note.id() == note_id)
            .ok_or(StorageError::NotFound)?;
        entry.1.set_memo(memo);
        Ok(())
    }

    async fn delete_note(&self, note_id: Uuid) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.notes)?;
        let before = guard.len();
        guard.retain(|(_, note)| note.id() != note_id);
        if guard.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get_progress(
        &self,
        profile_id: ProfileId,
        category_id: CategoryId,
    ) -> Result<Option<CategoryProgress>, StorageError> {
        let guard = Self::lock(&self.progress)?;
        Ok(guard.get(&(profile_id, category_id)).cloned())
    }

    async fn record_attempts(
        &self,
        profile_id: ProfileId,
        category_id: CategoryId,
        total: u32,
        correct: u32,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = Self::lock(&self.progress)?;
        let entry = guard
            .entry((profile_id, category_id))
            .or_insert_with(|| CategoryProgress::empty(profile_id, category_id));
        entry.record_attempts(total, correct, at);
        Ok(())
    }

    async fn list_progress(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<CategoryProgress>, StorageError> {
        let guard = Self::lock(&self.progress)?;
        let mut listed: Vec<CategoryProgress> = guard
            .values()
            .filter(|progress| progress.profile_id == profile_id)
            .cloned()
            .collect();
        listed.sort_by_key(|progress| progress.category_id.value());
        Ok(listed)
    }
}

//
// ─── STORAGE AGGREGATE ─────────────────────────────────────────────────────────
//

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub attempts: Arc<dyn AttemptRepository>,
    pub wrong_notes: Arc<dyn WrongNoteRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self {
            questions: Arc::new(repo.clone()),
            categories: Arc::new(repo.clone()),
            profiles: Arc::new(repo.clone()),
            attempts: Arc::new(repo.clone()),
            wrong_notes: Arc::new(repo.clone()),
            progress: Arc::new(repo),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
