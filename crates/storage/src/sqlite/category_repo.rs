use quiz_core::model::{Category, CategoryId};

use super::SqliteRepository;
use super::mapping::{id_to_i64, map_category_row};
use crate::repository::{CategoryRepository, StorageError};

#[async_trait::async_trait]
impl CategoryRepository for SqliteRepository {
    async fn upsert_category(&self, category: &Category) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO categories (id, name, icon_name, theme_color)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                icon_name = excluded.icon_name,
                theme_color = excluded.theme_color
            ",
        )
        .bind(id_to_i64("category_id", category.id().value())?)
        .bind(category.name())
        .bind(category.icon_name())
        .bind(category.theme_color())
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, StorageError> {
        let row = sqlx::query(
            "SELECT id, name, icon_name, theme_color FROM categories WHERE id = ?1",
        )
        .bind(id_to_i64("category_id", id.value())?)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_category_row(&row).map(Some),
            None => Ok(None),
        }
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query(
            "SELECT id, name, icon_name, theme_color FROM categories ORDER BY name ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut categories = Vec::with_capacity(rows.len());
        for row in rows {
            categories.push(map_category_row(&row)?);
        }
        Ok(categories)
    }

    async fn delete_category(&self, id: CategoryId) -> Result<(), StorageError> {
        // Question rows cascade via the foreign key.
        let res = sqlx::query("DELETE FROM categories WHERE id = ?1")
            .bind(id_to_i64("category_id", id.value())?)
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
