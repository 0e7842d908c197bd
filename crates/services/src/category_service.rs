use std::sync::Arc;

use quiz_core::model::{Category, CategoryId};
use storage::repository::{CategoryRepository, StorageError};

use crate::error::CategoryServiceError;

/// Orchestrates category management.
#[derive(Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    #[must_use]
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// Validate and persist a new category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Category` for validation failures
    /// (blank name, malformed theme color) and
    /// `CategoryServiceError::Storage` if persistence fails.
    pub async fn create_category(
        &self,
        id: CategoryId,
        name: String,
        icon_name: Option<String>,
        theme_color: Option<String>,
    ) -> Result<Category, CategoryServiceError> {
        let category = Category::new(id, name, icon_name, theme_color)?;
        self.categories.upsert_category(&category).await?;
        Ok(category)
    }

    /// Rename a category while keeping its icon and theme.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Category` if the new name is invalid,
    /// `CategoryServiceError::Storage` when the category is missing.
    pub async fn rename_category(
        &self,
        id: CategoryId,
        name: String,
    ) -> Result<Category, CategoryServiceError> {
        let existing = self
            .categories
            .get_category(id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let renamed = Category::new(
            id,
            name,
            existing.icon_name().map(str::to_owned),
            existing.theme_color().map(str::to_owned),
        )?;
        self.categories.upsert_category(&renamed).await?;
        Ok(renamed)
    }

    /// Fetch a category by ID. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` if repository access fails.
    pub async fn get_category(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, CategoryServiceError> {
        Ok(self.categories.get_category(id).await?)
    }

    /// List categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` if repository access fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CategoryServiceError> {
        Ok(self.categories.list_categories().await?)
    }

    /// Delete a category and all questions it owns.
    ///
    /// # Errors
    ///
    /// Returns `CategoryServiceError::Storage` with `NotFound` when the
    /// category does not exist.
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), CategoryServiceError> {
        Ok(self.categories.delete_category(id).await?)
    }
}
