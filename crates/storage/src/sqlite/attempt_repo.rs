use quiz_core::model::{ProfileId, QuizAttempt};

use super::SqliteRepository;
use super::mapping::{id_to_i64, map_attempt_row, selected_index_to_i64};
use crate::repository::{AttemptRepository, StorageError};

#[async_trait::async_trait]
impl AttemptRepository for SqliteRepository {
    async fn append_attempts(&self, attempts: &[QuizAttempt]) -> Result<(), StorageError> {
        if attempts.is_empty() {
            return Ok(());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        for attempt in attempts {
            sqlx::query(
                r"
                INSERT INTO attempts (profile_id, question_id, attempt_date, selected_index, was_correct, time_taken)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ",
            )
            .bind(id_to_i64("profile_id", attempt.profile_id.value())?)
            .bind(id_to_i64("question_id", attempt.question_id.value())?)
            .bind(attempt.attempt_date)
            .bind(selected_index_to_i64(attempt.selected_index)?)
            .bind(i64::from(attempt.was_correct))
            .bind(attempt.time_taken)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn list_attempts(&self, profile_id: ProfileId) -> Result<Vec<QuizAttempt>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT profile_id, question_id, attempt_date, selected_index, was_correct, time_taken
            FROM attempts
            WHERE profile_id = ?1
            ORDER BY attempt_date DESC, id DESC
            ",
        )
        .bind(id_to_i64("profile_id", profile_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut attempts = Vec::with_capacity(rows.len());
        for row in rows {
            attempts.push(map_attempt_row(&row)?);
        }
        Ok(attempts)
    }
}
