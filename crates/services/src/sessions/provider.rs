use std::sync::Arc;

use quiz_core::model::{CategoryId, Difficulty, Question};
use storage::repository::QuestionRepository;

use crate::error::SessionError;

/// Read-only source of the question set for one session.
///
/// Filters by category and difficulty together and returns the matches in a
/// deterministic order, so two sessions started over the same stored data see
/// the same questions in the same sequence. Loading never mutates storage.
#[derive(Clone)]
pub struct QuestionSetProvider {
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionSetProvider {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Load the question set for a category at one difficulty.
    ///
    /// An empty match is `Ok(vec![])`; deciding what an empty session means
    /// is the controller's job.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the repository fails.
    pub async fn load(
        &self,
        category_id: CategoryId,
        difficulty: Difficulty,
    ) -> Result<Vec<Question>, SessionError> {
        let mut questions = self
            .questions
            .list_questions(category_id, Some(difficulty))
            .await?;

        // The repository contract already orders by prompt; re-assert it here
        // so the session order never depends on the backend.
        questions.sort_by(|a, b| {
            a.prompt()
                .cmp(b.prompt())
                .then_with(|| a.id().value().cmp(&b.id().value()))
        });
        Ok(questions)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
