use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::difficulty::Difficulty;
use crate::model::question::Question;

/// Sentinel shown as the user's answer when a question was advanced or timed
/// out without a selection.
pub const NO_ANSWER: &str = "no answer";

/// Fallback explanation text so callers never see an empty field.
pub const NO_EXPLANATION: &str = "no explanation provided";

//
// ─── CHOICES ───────────────────────────────────────────────────────────────────
//

/// One labeled option in a wrong-note snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub label: String,
    pub text: String,
}

/// Positional label for an option: A, B, C, ...
#[must_use]
pub fn choice_label(index: usize) -> String {
    if index < 26 {
        char::from(b'A' + index as u8).to_string()
    } else {
        (index + 1).to_string()
    }
}

/// A suggested follow-up study item attached to a wrong note.
///
/// Notes are created with an empty list; recommendations are filled in by
/// later features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningRecommendation {
    pub title: String,
    pub duration: String,
}

//
// ─── WRONG NOTE ────────────────────────────────────────────────────────────────
//

/// A structured record of one missed or unanswered question, created once at
/// session completion for post-session review.
///
/// Everything except the user memo is immutable after creation; the memo is
/// edited from the review screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrongNote {
    id: Uuid,
    question: String,
    choices: Vec<Choice>,
    correct_answer: String,
    user_answer: String,
    explanation: String,
    difficulty: Difficulty,
    category_name: String,
    created_at: DateTime<Utc>,
    memo: String,
    recommendations: Vec<LearningRecommendation>,
}

impl WrongNote {
    /// Snapshot a question the user got wrong.
    ///
    /// Choice labels are assigned positionally from the question's own option
    /// order; `selected` of `None` renders as the [`NO_ANSWER`] sentinel and a
    /// missing explanation falls back to [`NO_EXPLANATION`].
    #[must_use]
    pub fn from_question(
        question: &Question,
        selected: Option<usize>,
        category_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let choices = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| Choice {
                label: choice_label(index),
                text: text.clone(),
            })
            .collect();

        let user_answer = selected
            .and_then(|index| question.options().get(index))
            .cloned()
            .unwrap_or_else(|| NO_ANSWER.to_string());

        Self {
            id: Uuid::new_v4(),
            question: question.prompt().to_string(),
            choices,
            correct_answer: question.correct_answer().to_string(),
            user_answer,
            explanation: question
                .explanation()
                .map_or_else(|| NO_EXPLANATION.to_string(), ToString::to_string),
            difficulty: question.difficulty(),
            category_name: category_name.into(),
            created_at,
            memo: String::new(),
            recommendations: Vec::new(),
        }
    }

    /// Rehydrate a wrong note from persisted storage.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn from_persisted(
        id: Uuid,
        question: String,
        choices: Vec<Choice>,
        correct_answer: String,
        user_answer: String,
        explanation: String,
        difficulty: Difficulty,
        category_name: String,
        created_at: DateTime<Utc>,
        memo: String,
        recommendations: Vec<LearningRecommendation>,
    ) -> Self {
        Self {
            id,
            question,
            choices,
            correct_answer,
            user_answer,
            explanation,
            difficulty,
            category_name,
            created_at,
            memo,
            recommendations,
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn user_answer(&self) -> &str {
        &self.user_answer
    }

    /// True when the note records an advanced-without-answering question.
    #[must_use]
    pub fn is_unanswered(&self) -> bool {
        self.user_answer == NO_ANSWER
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Display label for the note's difficulty.
    #[must_use]
    pub fn difficulty_label(&self) -> &'static str {
        self.difficulty.display_name()
    }

    #[must_use]
    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn memo(&self) -> &str {
        &self.memo
    }

    /// Replace the user memo. The memo is the only mutable field.
    pub fn set_memo(&mut self, memo: impl Into<String>) {
        self.memo = memo.into();
    }

    #[must_use]
    pub fn recommendations(&self) -> &[LearningRecommendation] {
        &self.recommendations
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
