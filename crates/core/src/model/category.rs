use thiserror::Error;

use crate::model::ids::CategoryId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CategoryError {
    #[error("category name cannot be empty")]
    EmptyName,

    #[error("invalid theme color {0:?}, expected #RRGGBB")]
    InvalidThemeColor(String),
}

/// Returns true when `value` is a `#RRGGBB` hex color string.
pub(crate) fn is_hex_color(value: &str) -> bool {
    let Some(rest) = value.strip_prefix('#') else {
        return false;
    };
    rest.len() == 6 && rest.chars().all(|c| c.is_ascii_hexdigit())
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// A quiz category that owns zero or more questions.
///
/// Icon and theme color are display metadata carried through to the
/// presentation layer; the theme color is validated here instead of failing
/// at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: CategoryId,
    name: String,
    icon_name: Option<String>,
    theme_color: Option<String>,
}

impl Category {
    /// Create a validated category.
    ///
    /// # Errors
    ///
    /// Returns `CategoryError::EmptyName` when the name is blank and
    /// `CategoryError::InvalidThemeColor` when the theme color is not a
    /// `#RRGGBB` hex string.
    pub fn new(
        id: CategoryId,
        name: impl Into<String>,
        icon_name: Option<String>,
        theme_color: Option<String>,
    ) -> Result<Self, CategoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CategoryError::EmptyName);
        }
        if let Some(color) = &theme_color {
            if !is_hex_color(color) {
                return Err(CategoryError::InvalidThemeColor(color.clone()));
            }
        }

        Ok(Self {
            id,
            name,
            icon_name,
            theme_color,
        })
    }

    #[must_use]
    pub fn id(&self) -> CategoryId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
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

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_category_constructs() {
        let category = Category::new(
            CategoryId::new(1),
            "Swift",
            Some("swift".to_string()),
            Some("#3498db".to_string()),
        )
        .unwrap();
        assert_eq!(category.name(), "Swift");
        assert_eq!(category.theme_color(), Some("#3498db"));
    }

    #[test]
    fn rejects_blank_name() {
        let err = Category::new(CategoryId::new(1), "  ", None, None).unwrap_err();
        assert_eq!(err, CategoryError::EmptyName);
    }

    #[test]
    fn rejects_malformed_theme_color() {
        for bad in ["3498db", "#12345", "#12345g", "#1234567"] {
            let err = Category::new(CategoryId::new(1), "Swift", None, Some(bad.to_string()))
                .unwrap_err();
            assert!(matches!(err, CategoryError::InvalidThemeColor(_)), "{bad}");
        }
    }

    #[test]
    fn theme_color_is_optional() {
        let category = Category::new(CategoryId::new(1), "Swift", None, None).unwrap();
        assert!(category.theme_color().is_none());
    }
}
