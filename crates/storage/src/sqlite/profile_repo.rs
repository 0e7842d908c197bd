use quiz_core::model::{Profile, ProfileId};

use super::SqliteRepository;
use super::mapping::{id_to_i64, map_profile_row};
use crate::repository::{ProfileRepository, StorageError};

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn upsert_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO profiles (id, name, created_at, icon_name, theme_color)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                icon_name = excluded.icon_name,
                theme_color = excluded.theme_color
            ",
        )
        .bind(id_to_i64("profile_id", profile.id().value())?)
        .bind(profile.name())
        .bind(profile.created_at())
        .bind(profile.icon_name())
        .bind(profile.theme_color())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>, StorageError> {
        let row = sqlx::query(
            "SELECT id, name, created_at, icon_name, theme_color FROM profiles WHERE id = ?1",
        )
        .bind(id_to_i64("profile_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_profile_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, name, created_at, icon_name, theme_color FROM profiles ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut profiles = Vec::with_capacity(rows.len());
        for row in rows {
            profiles.push(map_profile_row(&row)?);
        }
        Ok(profiles)
    }

    async fn delete_profile(&self, id: ProfileId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM profiles WHERE id = ?1")
            .bind(id_to_i64("profile_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
