use quiz_core::model::{CategoryId, Difficulty, Question, QuestionId};

use super::SqliteRepository;
use super::mapping::{difficulty_to_i64, id_to_i64, map_question_row, ser};
use crate::repository::{QuestionRepository, StorageError};

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn upsert_question(&self, question: &Question) -> Result<(), StorageError> {
        let id = id_to_i64("question_id", question.id().value())?;
        let category_id = id_to_i64("category_id", question.category_id().value())?;
        let options = serde_json::to_string(question.options()).map_err(ser)?;
        let correct_index = i64::try_from(question.correct_index())
            .map_err(|_| StorageError::Serialization("correct_index overflow".into()))?;

        sqlx::query(
            r"
            INSERT INTO questions (id, category_id, prompt, options, correct_index, explanation, difficulty, image_path, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                category_id = excluded.category_id,
                prompt = excluded.prompt,
                options = excluded.options,
                correct_index = excluded.correct_index,
                explanation = excluded.explanation,
                difficulty = excluded.difficulty,
                image_path = excluded.image_path
            ",
        )
        .bind(id)
        .bind(category_id)
        .bind(question.prompt())
        .bind(options)
        .bind(correct_index)
        .bind(question.explanation())
        .bind(difficulty_to_i64(question.difficulty()))
        .bind(question.image_path())
        .bind(question.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_question(&self, id: QuestionId) -> Result<Option<Question>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, category_id, prompt, options, correct_index, explanation, difficulty, image_path, created_at
            FROM questions WHERE id = ?1
            ",
        )
        .bind(id_to_i64("question_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_question_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn list_questions(
        &self,
        category_id: CategoryId,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Question>, StorageError> {
        let category_id = id_to_i64("category_id", category_id.value())?;

        // Sorted by prompt (id as tie-break) so repeated loads of the same
        // data always return the same sequence.
        let rows = match difficulty {
            Some(difficulty) => {
                sqlx::query(
                    r"
                    SELECT id, category_id, prompt, options, correct_index, explanation, difficulty, image_path, created_at
                    FROM questions
                    WHERE category_id = ?1 AND difficulty = ?2
                    ORDER BY prompt ASC, id ASC
                    ",
                )
                .bind(category_id)
                .bind(difficulty_to_i64(difficulty))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r"
                    SELECT id, category_id, prompt, options, correct_index, explanation, difficulty, image_path, created_at
                    FROM questions
                    WHERE category_id = ?1
                    ORDER BY prompt ASC, id ASC
                    ",
                )
                .bind(category_id)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?);
        }
        Ok(questions)
    }

    async fn delete_question(&self, id: QuestionId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id_to_i64("question_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
