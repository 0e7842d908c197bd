use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::difficulty::Difficulty;
use crate::model::ids::{CategoryId, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must have at least one option")]
    NoOptions,

    #[error("option {index} cannot be empty")]
    EmptyOption { index: usize },

    #[error("correct index {correct_index} is out of range for {option_count} options")]
    CorrectIndexOutOfRange {
        correct_index: usize,
        option_count: usize,
    },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question owned by a category.
///
/// Construction validates the option invariants, so a `Question` in hand is
/// always internally consistent: `options` is non-empty and `correct_index`
/// addresses a real option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    category_id: CategoryId,
    prompt: String,
    options: Vec<String>,
    correct_index: usize,
    explanation: Option<String>,
    difficulty: Difficulty,
    image_path: Option<String>,
    created_at: DateTime<Utc>,
}

impl Question {
    /// Create a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyPrompt` when the prompt is blank,
    /// `QuestionError::NoOptions` when no options are given,
    /// `QuestionError::EmptyOption` when any option is blank, and
    /// `QuestionError::CorrectIndexOutOfRange` when `correct_index` does not
    /// address an option.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: QuestionId,
        category_id: CategoryId,
        prompt: impl Into<String>,
        options: Vec<String>,
        correct_index: usize,
        explanation: Option<String>,
        difficulty: Difficulty,
        image_path: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }
        if let Some(index) = options.iter().position(|option| option.trim().is_empty()) {
            return Err(QuestionError::EmptyOption { index });
        }
        if correct_index >= options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                correct_index,
                option_count: options.len(),
            });
        }

        Ok(Self {
            id,
            category_id,
            prompt,
            options,
            correct_index,
            explanation,
            difficulty,
            image_path,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_answer(&self) -> &str {
        // correct_index is validated against options at construction
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn image_path(&self) -> Option<&str> {
        self.image_path.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true when the selected option index is the correct one.
    ///
    /// `None` means the question was advanced without a selection and is
    /// never correct.
    #[must_use]
    pub fn is_correct_selection(&self, selected: Option<usize>) -> bool {
        selected == Some(self.correct_index)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
