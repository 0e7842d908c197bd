use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DifficultyError {
    #[error("difficulty level must be between 1 and 5, got {0}")]
    OutOfRange(u8),
}

/// Question difficulty on an ordinal 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Level1,
    Level2,
    Level3,
    Level4,
    Level5,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Difficulty::Level1,
        Difficulty::Level2,
        Difficulty::Level3,
        Difficulty::Level4,
        Difficulty::Level5,
    ];

    /// Build a difficulty from its ordinal level.
    ///
    /// # Errors
    ///
    /// Returns `DifficultyError::OutOfRange` for levels outside 1-5.
    pub fn from_level(level: u8) -> Result<Self, DifficultyError> {
        match level {
            1 => Ok(Difficulty::Level1),
            2 => Ok(Difficulty::Level2),
            3 => Ok(Difficulty::Level3),
            4 => Ok(Difficulty::Level4),
            5 => Ok(Difficulty::Level5),
            other => Err(DifficultyError::OutOfRange(other)),
        }
    }

    /// Ordinal level in 1..=5.
    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Level1 => 1,
            Difficulty::Level2 => 2,
            Difficulty::Level3 => 3,
            Difficulty::Level4 => 4,
            Difficulty::Level5 => 5,
        }
    }

    /// Human-readable label for result screens and wrong notes.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Difficulty::Level1 => "very easy",
            Difficulty::Level2 => "easy",
            Difficulty::Level3 => "normal",
            Difficulty::Level4 => "hard",
            Difficulty::Level5 => "very hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s.parse::<u8>().map_err(|_| DifficultyError::OutOfRange(0))?;
        Self::from_level(level)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
