use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{QuizAttempt, SessionConfig, SessionResult};
use storage::repository::{
    AttemptRepository, CategoryRepository, ProgressRepository, Storage, StorageError,
    WrongNoteRepository,
};

use super::controller::{SessionController, SessionState};
use super::provider::QuestionSetProvider;
use crate::error::SessionError;

/// Storage-backed orchestration around the session controller.
///
/// `start` resolves the category and loads the question set; `finish`
/// persists a completed session's artifacts. Abandoned sessions write
/// nothing, which is why persistence lives here and not in the controller.
#[derive(Clone)]
pub struct SessionWorkflow {
    clock: Clock,
    storage: Storage,
}

impl SessionWorkflow {
    #[must_use]
    pub fn new(clock: Clock, storage: Storage) -> Self {
        Self { clock, storage }
    }

    /// Resolve the configured category and start a controller over its
    /// question set.
    ///
    /// The returned controller may be in the `NoContent` state when the
    /// category holds no questions at the requested difficulty; inspect
    /// `state()` before presenting.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the category does not exist or
    /// the repository fails.
    pub async fn start(&self, config: SessionConfig) -> Result<SessionController, SessionError> {
        let category = self
            .storage
            .categories
            .get_category(config.category_id())
            .await?
            .ok_or(StorageError::NotFound)?;

        let provider = QuestionSetProvider::new(Arc::clone(&self.storage.questions));
        let mut controller = SessionController::new(config, category.name());
        let outcome = controller.start(&provider, self.clock.now()).await?;
        log::info!(
            "session started for category {}: {outcome:?}",
            config.category_id()
        );
        Ok(controller)
    }

    /// Persist a completed session: one attempt row per answer record, the
    /// wrong notes, and the category progress accumulation.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Abandoned`/`SessionError::NotStarted` when the
    /// controller is not in the completed state, and `SessionError::Storage`
    /// when any write fails.
    pub async fn finish(
        &self,
        controller: &SessionController,
        result: &SessionResult,
    ) -> Result<(), SessionError> {
        match controller.state() {
            SessionState::Completed => {}
            SessionState::Abandoned => return Err(SessionError::Abandoned),
            _ => return Err(SessionError::NotStarted),
        }

        let config = controller.config();
        let completed_at = self.clock.now();

        let attempts: Vec<QuizAttempt> = controller
            .questions()
            .iter()
            .zip(controller.records())
            .map(|(question, record)| {
                QuizAttempt::from_record(
                    config.profile_id(),
                    question.id(),
                    record,
                    completed_at,
                    None,
                )
            })
            .collect();

        self.storage.attempts.append_attempts(&attempts).await?;
        self.storage
            .wrong_notes
            .append_notes(config.profile_id(), result.wrong_notes())
            .await?;
        self.storage
            .progress
            .record_attempts(
                config.profile_id(),
                config.category_id(),
                result.total_questions(),
                result.correct_count(),
                completed_at,
            )
            .await?;

        log::info!(
            "session persisted for profile {}: {}/{} correct",
            config.profile_id(),
            result.correct_count(),
            result.total_questions()
        );
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{
        Category, CategoryId, Difficulty, ProfileId, Question, QuestionId,
    };
    use quiz_core::time::{fixed_clock, fixed_now};
    use storage::repository::{InMemoryRepository, QuestionRepository};

    use crate::sessions::controller::AdvanceOutcome;

    fn build_question(id: u64, prompt: &str, correct_index: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            CategoryId::new(1),
            prompt,
            vec!["a".to_string(), "b".to_string()],
            correct_index,
            None,
            Difficulty::Level2,
            None,
            fixed_now(),
        )
        .unwrap()
    }

    async fn seeded_storage() -> Storage {
        let repo = InMemoryRepository::new();
        let storage = Storage {
            questions: Arc::new(repo.clone()),
            categories: Arc::new(repo.clone()),
            profiles: Arc::new(repo.clone()),
            attempts: Arc::new(repo.clone()),
            wrong_notes: Arc::new(repo.clone()),
            progress: Arc::new(repo),
        };
        storage
            .categories
            .upsert_category(&Category::new(CategoryId::new(1), "Swift", None, None).unwrap())
            .await
            .unwrap();
        storage
            .questions
            .upsert_question(&build_question(1, "q1", 0))
            .await
            .unwrap();
        storage
            .questions
            .upsert_question(&build_question(2, "q2", 1))
            .await
            .unwrap();
        storage
    }

    fn config() -> SessionConfig {
        SessionConfig::new(ProfileId::new(7), CategoryId::new(1), Difficulty::Level2)
    }

    #[tokio::test]
    async fn completed_session_persists_attempts_notes_and_progress() {
        let storage = seeded_storage().await;
        let workflow = SessionWorkflow::new(fixed_clock(), storage.clone());

        let mut controller = workflow.start(config()).await.unwrap();
        controller.select_option(0).unwrap();
        controller.advance(fixed_now()).unwrap();
        controller.select_option(0).unwrap();
        let AdvanceOutcome::Completed(result) = controller.advance(fixed_now()).unwrap() else {
            panic!("expected completion");
        };

        workflow.finish(&controller, &result).await.unwrap();

        let attempts = storage
            .attempts
            .list_attempts(ProfileId::new(7))
            .await
            .unwrap();
        assert_eq!(attempts.len(), 2);
        assert!(attempts.iter().any(|a| a.was_correct));
        assert!(attempts.iter().any(|a| !a.was_correct));

        let notes = storage
            .wrong_notes
            .list_notes(ProfileId::new(7))
            .await
            .unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].question(), "q2");

        let progress = storage
            .progress
            .get_progress(ProfileId::new(7), CategoryId::new(1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(progress.total_attempts, 2);
        assert_eq!(progress.correct_attempts, 1);
    }

    #[tokio::test]
    async fn abandoned_session_persists_nothing() {
        let storage = seeded_storage().await;
        let workflow = SessionWorkflow::new(fixed_clock(), storage.clone());

        let mut controller = workflow.start(config()).await.unwrap();
        controller.select_option(0).unwrap();
        controller.advance(fixed_now()).unwrap();
        controller.abandon().unwrap();

        let fake_result =
            SessionResult::new(0, 0, chrono::Duration::zero(), 0, Vec::new()).unwrap();
        let err = workflow.finish(&controller, &fake_result).await.unwrap_err();
        assert!(matches!(err, SessionError::Abandoned));

        assert!(
            storage
                .attempts
                .list_attempts(ProfileId::new(7))
                .await
                .unwrap()
                .is_empty()
        );
        assert!(
            storage
                .progress
                .get_progress(ProfileId::new(7), CategoryId::new(1))
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn unknown_category_fails_to_start() {
        let storage = Storage::in_memory();
        let workflow = SessionWorkflow::new(fixed_clock(), storage);

        let err = workflow.start(config()).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::Storage(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn empty_category_starts_as_no_content() {
        let storage = Storage::in_memory();
        storage
            .categories
            .upsert_category(&Category::new(CategoryId::new(1), "Swift", None, None).unwrap())
            .await
            .unwrap();
        let workflow = SessionWorkflow::new(fixed_clock(), storage);

        let controller = workflow.start(config()).await.unwrap();
        assert_eq!(controller.state(), SessionState::NoContent);
    }
}
