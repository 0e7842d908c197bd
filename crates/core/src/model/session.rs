use chrono::Duration;

use crate::model::difficulty::Difficulty;
use crate::model::ids::{CategoryId, ProfileId};
use crate::model::question::Question;

/// Default overall time budget for one session.
pub const DEFAULT_TIME_LIMIT_SECS: i64 = 600;

//
// ─── SESSION CONFIG ────────────────────────────────────────────────────────────
//

/// Immutable configuration for one quiz session.
///
/// The profile is passed in explicitly so the session core never reads
/// ambient "current user" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    profile_id: ProfileId,
    category_id: CategoryId,
    difficulty: Difficulty,
    time_limit: Duration,
}

impl SessionConfig {
    /// Config with the default 600 second time limit.
    #[must_use]
    pub fn new(profile_id: ProfileId, category_id: CategoryId, difficulty: Difficulty) -> Self {
        Self {
            profile_id,
            category_id,
            difficulty,
            time_limit: Duration::seconds(DEFAULT_TIME_LIMIT_SECS),
        }
    }

    #[must_use]
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    #[must_use]
    pub fn profile_id(&self) -> ProfileId {
        self.profile_id
    }

    #[must_use]
    pub fn category_id(&self) -> CategoryId {
        self.category_id
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

//
// ─── ANSWER RECORD ─────────────────────────────────────────────────────────────
//

/// One committed answer for one question, produced exactly once per question
/// in question order.
///
/// `selected: None` means the user advanced without choosing an option; it is
/// modeled explicitly and never coerced to option 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_index: usize,
    pub selected: Option<usize>,
    pub is_correct: bool,
}

impl AnswerRecord {
    /// Commit a selection against a question, deciding correctness now.
    #[must_use]
    pub fn commit(question_index: usize, question: &Question, selected: Option<usize>) -> Self {
        Self {
            question_index,
            selected,
            is_correct: question.is_correct_selection(selected),
        }
    }

    /// Record for a question that was never reached before the timer expired.
    #[must_use]
    pub fn unanswered(question_index: usize) -> Self {
        Self {
            question_index,
            selected: None,
            is_correct: false,
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ids::QuestionId;
    use crate::time::fixed_now;

    fn build_question() -> Question {
        Question::new(
            QuestionId::new(1),
            CategoryId::new(1),
            "Q",
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            1,
            None,
            Difficulty::Level2,
            None,
            fixed_now(),
        )
        .unwrap()
    }

    #[test]
    fn config_defaults_to_600_seconds() {
        let config = SessionConfig::new(
            ProfileId::new(1),
            CategoryId::new(2),
            Difficulty::Level3,
        );
        assert_eq!(config.time_limit(), Duration::seconds(600));
    }

    #[test]
    fn config_time_limit_is_overridable() {
        let config = SessionConfig::new(ProfileId::new(1), CategoryId::new(2), Difficulty::Level3)
            .with_time_limit(Duration::seconds(60));
        assert_eq!(config.time_limit(), Duration::seconds(60));
    }

    #[test]
    fn commit_decides_correctness_at_record_time() {
        let question = build_question();
        assert!(AnswerRecord::commit(0, &question, Some(1)).is_correct);
        assert!(!AnswerRecord::commit(0, &question, Some(0)).is_correct);
        assert!(!AnswerRecord::commit(0, &question, None).is_correct);
    }

    #[test]
    fn unanswered_record_is_incorrect_with_no_selection() {
        let record = AnswerRecord::unanswered(3);
        assert_eq!(record.question_index, 3);
        assert_eq!(record.selected, None);
        assert!(!record.is_correct);
    }
}
