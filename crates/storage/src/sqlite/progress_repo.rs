use chrono::{DateTime, Utc};

use quiz_core::model::{CategoryId, CategoryProgress, ProfileId};

use super::SqliteRepository;
use super::mapping::{id_to_i64, map_progress_row};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get_progress(
        &self,
        profile_id: ProfileId,
        category_id: CategoryId,
    ) -> Result<Option<CategoryProgress>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT profile_id, category_id, total_attempts, correct_attempts, last_attempted_at
            FROM category_progress
            WHERE profile_id = ?1 AND category_id = ?2
            ",
        )
        .bind(id_to_i64("profile_id", profile_id.value())?)
        .bind(id_to_i64("category_id", category_id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_progress_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn record_attempts(
        &self,
        profile_id: ProfileId,
        category_id: CategoryId,
        total: u32,
        correct: u32,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO category_progress (profile_id, category_id, total_attempts, correct_attempts, last_attempted_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(profile_id, category_id) DO UPDATE SET
                total_attempts = category_progress.total_attempts + excluded.total_attempts,
                correct_attempts = category_progress.correct_attempts + excluded.correct_attempts,
                last_attempted_at = excluded.last_attempted_at
            ",
        )
        .bind(id_to_i64("profile_id", profile_id.value())?)
        .bind(id_to_i64("category_id", category_id.value())?)
        .bind(i64::from(total))
        .bind(i64::from(correct))
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn list_progress(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<CategoryProgress>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT profile_id, category_id, total_attempts, correct_attempts, last_attempted_at
            FROM category_progress
            WHERE profile_id = ?1
            ORDER BY category_id ASC
            ",
        )
        .bind(id_to_i64("profile_id", profile_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut listed = Vec::with_capacity(rows.len());
        for row in rows {
            listed.push(map_progress_row(&row)?);
        }
        Ok(listed)
    }
}
