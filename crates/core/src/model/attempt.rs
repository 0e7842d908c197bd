use chrono::{DateTime, Utc};

use crate::model::ids::{ProfileId, QuestionId};
use crate::model::session::AnswerRecord;

/// One persisted answer to one question, kept for dashboards and score-rate
/// history after the session that produced it is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizAttempt {
    pub profile_id: ProfileId,
    pub question_id: QuestionId,
    pub attempt_date: DateTime<Utc>,
    pub selected_index: Option<usize>,
    pub was_correct: bool,
    pub time_taken: Option<f64>,
}

impl QuizAttempt {
    /// Build an attempt row from a committed answer record.
    #[must_use]
    pub fn from_record(
        profile_id: ProfileId,
        question_id: QuestionId,
        record: &AnswerRecord,
        attempt_date: DateTime<Utc>,
        time_taken: Option<f64>,
    ) -> Self {
        Self {
            profile_id,
            question_id,
            attempt_date,
            selected_index: record.selected,
            was_correct: record.is_correct,
            time_taken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn from_record_preserves_missing_selection() {
        let record = AnswerRecord::unanswered(0);
        let attempt = QuizAttempt::from_record(
            ProfileId::new(1),
            QuestionId::new(7),
            &record,
            fixed_now(),
            Some(12.5),
        );

        assert_eq!(attempt.selected_index, None);
        assert!(!attempt.was_correct);
        assert_eq!(attempt.question_id, QuestionId::new(7));
        assert_eq!(attempt.time_taken, Some(12.5));
    }
}
