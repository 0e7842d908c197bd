use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::category::is_hex_color;
use crate::model::ids::ProfileId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("profile name cannot be empty")]
    EmptyName,

    #[error("invalid theme color {0:?}, expected #RRGGBB")]
    InvalidThemeColor(String),
}

/// A local user profile. Attempts, progress and wrong notes are keyed by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    id: ProfileId,
    name: String,
    created_at: DateTime<Utc>,
    icon_name: Option<String>,
    theme_color: Option<String>,
}

impl Profile {
    /// Create a validated profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyName` when the name is blank and
    /// `ProfileError::InvalidThemeColor` for a malformed hex color.
    pub fn new(
        id: ProfileId,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
        icon_name: Option<String>,
        theme_color: Option<String>,
    ) -> Result<Self, ProfileError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if let Some(color) = &theme_color {
            if !is_hex_color(color) {
                return Err(ProfileError::InvalidThemeColor(color.clone()));
            }
        }

        Ok(Self {
            id,
            name,
            created_at,
            icon_name,
            theme_color,
        })
    }

    #[must_use]
    pub fn id(&self) -> ProfileId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn icon_name(&self) -> Option<&str> {
        self.icon_name.as_deref()
    }

    #[must_use]
    pub fn theme_color(&self) -> Option<&str> {
        self.theme_color.as_deref()
    }
}
