use std::sync::Arc;

use uuid::Uuid;

use quiz_core::model::{ProfileId, WrongNote};
use storage::repository::WrongNoteRepository;

use crate::error::WrongNoteServiceError;

/// Review-screen access to persisted wrong notes.
///
/// Notes are written by the session workflow; this service only reads them
/// and applies the one mutation the review screen owns, the user memo.
#[derive(Clone)]
pub struct WrongNoteService {
    wrong_notes: Arc<dyn WrongNoteRepository>,
}

impl WrongNoteService {
    #[must_use]
    pub fn new(wrong_notes: Arc<dyn WrongNoteRepository>) -> Self {
        Self { wrong_notes }
    }

    /// List a profile's notes, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `WrongNoteServiceError::Storage` if repository access fails.
    pub async fn list_notes(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<WrongNote>, WrongNoteServiceError> {
        Ok(self.wrong_notes.list_notes(profile_id).await?)
    }

    /// Replace the memo on a note.
    ///
    /// # Errors
    ///
    /// Returns `WrongNoteServiceError::Storage` with `NotFound` when the
    /// note does not exist.
    pub async fn update_memo(&self, note_id: Uuid, memo: &str) -> Result<(), WrongNoteServiceError> {
        Ok(self.wrong_notes.update_memo(note_id, memo).await?)
    }

    /// Delete a note the user no longer wants to review.
    ///
    /// # Errors
    ///
    /// Returns `WrongNoteServiceError::Storage` with `NotFound` when the
    /// note does not exist.
    pub async fn delete_note(&self, note_id: Uuid) -> Result<(), WrongNoteServiceError> {
        Ok(self.wrong_notes.delete_note(note_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{CategoryId, Difficulty, Question, QuestionId};
    use quiz_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    fn build_note() -> WrongNote {
        let question = Question::new(
            QuestionId::new(1),
            CategoryId::new(1),
            "Q",
            vec!["a".to_string(), "b".to_string()],
            0,
            None,
            Difficulty::Level1,
            None,
            fixed_now(),
        )
        .unwrap();
        WrongNote::from_question(&question, Some(1), "Swift", fixed_now())
    }

    #[tokio::test]
    async fn memo_round_trips() {
        let repo = InMemoryRepository::new();
        let note = build_note();
        repo.append_notes(ProfileId::new(1), std::slice::from_ref(&note))
            .await
            .unwrap();

        let service = WrongNoteService::new(Arc::new(repo));
        service
            .update_memo(note.id(), "watch the optional binding")
            .await
            .unwrap();

        let listed = service.list_notes(ProfileId::new(1)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].memo(), "watch the optional binding");
    }

    #[tokio::test]
    async fn deleting_unknown_note_is_not_found() {
        let service = WrongNoteService::new(Arc::new(InMemoryRepository::new()));
        let err = service.delete_note(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(
            err,
            WrongNoteServiceError::Storage(StorageError::NotFound)
        ));
    }
}
