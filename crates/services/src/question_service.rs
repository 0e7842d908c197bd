use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{CategoryId, Difficulty, Question, QuestionId};
use storage::repository::{CategoryRepository, QuestionRepository, StorageError};

use crate::error::QuestionServiceError;

/// Orchestrates question authoring and persistence.
#[derive(Clone)]
pub struct QuestionService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(
        clock: Clock,
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            clock,
            questions,
            categories,
        }
    }

    /// Validate and persist a new question under an existing category.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for validation failures,
    /// `QuestionServiceError::Storage` when the category does not exist or
    /// persistence fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_question(
        &self,
        id: QuestionId,
        category_id: CategoryId,
        prompt: String,
        options: Vec<String>,
        correct_index: usize,
        explanation: Option<String>,
        difficulty: Difficulty,
        image_path: Option<String>,
    ) -> Result<Question, QuestionServiceError> {
        self.categories
            .get_category(category_id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let question = Question::new(
            id,
            category_id,
            prompt,
            options,
            correct_index,
            explanation,
            difficulty,
            image_path,
            self.clock.now(),
        )?;
        self.questions.upsert_question(&question).await?;
        Ok(question)
    }

    /// Replace the stored content of an existing question, keeping its
    /// creation time.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Question` for validation failures,
    /// `QuestionServiceError::Storage` when the question is missing.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_question(
        &self,
        id: QuestionId,
        prompt: String,
        options: Vec<String>,
        correct_index: usize,
        explanation: Option<String>,
        difficulty: Difficulty,
        image_path: Option<String>,
    ) -> Result<Question, QuestionServiceError> {
        let existing = self
            .questions
            .get_question(id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let updated = Question::new(
            id,
            existing.category_id(),
            prompt,
            options,
            correct_index,
            explanation,
            difficulty,
            image_path,
            existing.created_at(),
        )?;
        self.questions.upsert_question(&updated).await?;
        Ok(updated)
    }

    /// Fetch a question by ID. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn get_question(
        &self,
        id: QuestionId,
    ) -> Result<Option<Question>, QuestionServiceError> {
        Ok(self.questions.get_question(id).await?)
    }

    /// List a category's questions, optionally narrowed to one difficulty.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` if repository access fails.
    pub async fn list_questions(
        &self,
        category_id: CategoryId,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, QuestionServiceError> {
        Ok(self.questions.list_questions(category_id, difficulty).await?)
    }

    /// Delete a question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionServiceError::Storage` with `NotFound` when the
    /// question does not exist.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), QuestionServiceError> {
        Ok(self.questions.delete_question(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Category, QuestionError};
    use quiz_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn build_service(repo: &InMemoryRepository) -> QuestionService {
        QuestionService::new(
            fixed_clock(),
            Arc::new(repo.clone()),
            Arc::new(repo.clone()),
        )
    }

    async fn seed_category(repo: &InMemoryRepository) {
        repo.upsert_category(&Category::new(CategoryId::new(1), "Swift", None, None).unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_requires_existing_category() {
        let repo = InMemoryRepository::new();
        let service = build_service(&repo);

        let err = service
            .create_question(
                QuestionId::new(1),
                CategoryId::new(1),
                "Q".to_string(),
                vec!["a".to_string()],
                0,
                None,
                Difficulty::Level1,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionServiceError::Storage(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn create_rejects_bad_correct_index() {
        let repo = InMemoryRepository::new();
        seed_category(&repo).await;
        let service = build_service(&repo);

        let err = service
            .create_question(
                QuestionId::new(1),
                CategoryId::new(1),
                "Q".to_string(),
                vec!["a".to_string(), "b".to_string()],
                2,
                None,
                Difficulty::Level1,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            QuestionServiceError::Question(QuestionError::CorrectIndexOutOfRange { .. })
        ));
    }

    #[tokio::test]
    async fn update_preserves_category_and_created_at() {
        let repo = InMemoryRepository::new();
        seed_category(&repo).await;
        let service = build_service(&repo);

        let created = service
            .create_question(
                QuestionId::new(1),
                CategoryId::new(1),
                "Q".to_string(),
                vec!["a".to_string(), "b".to_string()],
                0,
                None,
                Difficulty::Level1,
                None,
            )
            .await
            .unwrap();

        let updated = service
            .update_question(
                QuestionId::new(1),
                "Q revised".to_string(),
                vec!["a".to_string(), "b".to_string()],
                1,
                Some("because".to_string()),
                Difficulty::Level3,
                None,
            )
            .await
            .unwrap();

        assert_eq!(updated.category_id(), created.category_id());
        assert_eq!(updated.created_at(), created.created_at());
        assert_eq!(updated.prompt(), "Q revised");
        assert_eq!(updated.correct_index(), 1);
    }
}
