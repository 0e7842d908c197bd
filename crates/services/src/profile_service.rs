use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Profile, ProfileId};
use storage::repository::{ProfileRepository, StorageError};

use crate::error::ProfileServiceError;

/// Orchestrates profile management.
#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { clock, profiles }
    }

    /// Validate and persist a new profile, timestamped from the service
    /// clock.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Profile` for validation failures and
    /// `ProfileServiceError::Storage` if persistence fails.
    pub async fn create_profile(
        &self,
        id: ProfileId,
        name: String,
        icon_name: Option<String>,
        theme_color: Option<String>,
    ) -> Result<Profile, ProfileServiceError> {
        let profile = Profile::new(id, name, self.clock.now(), icon_name, theme_color)?;
        self.profiles.upsert_profile(&profile).await?;
        Ok(profile)
    }

    /// Fetch a profile by ID. Returns `Ok(None)` when missing.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if repository access fails.
    pub async fn get_profile(
        &self,
        id: ProfileId,
    ) -> Result<Option<Profile>, ProfileServiceError> {
        Ok(self.profiles.get_profile(id).await?)
    }

    /// List profiles ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if repository access fails.
    pub async fn list_profiles(&self) -> Result<Vec<Profile>, ProfileServiceError> {
        Ok(self.profiles.list_profiles().await?)
    }

    /// Rename a profile, keeping its icon, theme and creation time.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Profile` if the new name is invalid,
    /// `ProfileServiceError::Storage` when the profile is missing.
    pub async fn rename_profile(
        &self,
        id: ProfileId,
        name: String,
    ) -> Result<Profile, ProfileServiceError> {
        let existing = self
            .profiles
            .get_profile(id)
            .await?
            .ok_or(StorageError::NotFound)?;

        let renamed = Profile::new(
            id,
            name,
            existing.created_at(),
            existing.icon_name().map(str::to_owned),
            existing.theme_color().map(str::to_owned),
        )?;
        self.profiles.upsert_profile(&renamed).await?;
        Ok(renamed)
    }

    /// Delete a profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` with `NotFound` when the
    /// profile does not exist.
    pub async fn delete_profile(&self, id: ProfileId) -> Result<(), ProfileServiceError> {
        Ok(self.profiles.delete_profile(id).await?)
    }
}
