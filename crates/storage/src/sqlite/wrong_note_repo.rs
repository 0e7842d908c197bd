use uuid::Uuid;

use quiz_core::model::{ProfileId, WrongNote};

use super::SqliteRepository;
use super::mapping::{difficulty_to_i64, id_to_i64, map_wrong_note_row, ser};
use crate::repository::{StorageError, WrongNoteRepository};

#[async_trait::async_trait]
impl WrongNoteRepository for SqliteRepository {
    async fn append_notes(
        &self,
        profile_id: ProfileId,
        notes: &[WrongNote],
    ) -> Result<(), StorageError> {
        if notes.is_empty() {
            return Ok(());
        }

        let profile_id = id_to_i64("profile_id", profile_id.value())?;
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        for note in notes {
            let choices = serde_json::to_string(note.choices()).map_err(ser)?;
            let recommendations = serde_json::to_string(note.recommendations()).map_err(ser)?;

            sqlx::query(
                r"
                INSERT INTO wrong_notes (id, profile_id, question, choices, correct_answer, user_answer, explanation, difficulty, category_name, created_at, memo, recommendations)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
                ",
            )
            .bind(note.id().to_string())
            .bind(profile_id)
            .bind(note.question())
            .bind(choices)
            .bind(note.correct_answer())
            .bind(note.user_answer())
            .bind(note.explanation())
            .bind(difficulty_to_i64(note.difficulty()))
            .bind(note.category_name())
            .bind(note.created_at())
            .bind(note.memo())
            .bind(recommendations)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(())
    }

    async fn list_notes(&self, profile_id: ProfileId) -> Result<Vec<WrongNote>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, question, choices, correct_answer, user_answer, explanation, difficulty, category_name, created_at, memo, recommendations
            FROM wrong_notes
            WHERE profile_id = ?1
            ORDER BY created_at DESC, id ASC
            ",
        )
        .bind(id_to_i64("profile_id", profile_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut notes = Vec::with_capacity(rows.len());
        for row in rows {
            notes.push(map_wrong_note_row(&row)?);
        }
        Ok(notes)
    }

    async fn update_memo(&self, note_id: Uuid, memo: &str) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE wrong_notes SET memo = ?1 WHERE id = ?2")
            .bind(memo)
            .bind(note_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn delete_note(&self, note_id: Uuid) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM wrong_notes WHERE id = ?1")
            .bind(note_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
