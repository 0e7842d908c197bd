use quiz_core::model::AnswerRecord;

/// Aggregate counts and score for one finished question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreTally {
    pub correct_count: u32,
    pub incorrect_count: u32,
    pub score_percentage: u8,
}

/// Pure scoring over committed answer records.
pub struct ScoringEngine;

impl ScoringEngine {
    /// Tally a record set against the session's total question count.
    ///
    /// `incorrect = total - correct`, which folds wrong answers, explicit
    /// non-answers and any timeout-truncated tail into one number. The
    /// percentage is 0 for an empty set, otherwise `correct / total * 100`
    /// rounded half-up. Calling this twice on the same input yields the same
    /// tally.
    #[must_use]
    pub fn tally(records: &[AnswerRecord], total: usize) -> ScoreTally {
        let correct = records.iter().filter(|record| record.is_correct).count();
        let correct_count = u32::try_from(correct).unwrap_or(u32::MAX);
        let total_count = u32::try_from(total).unwrap_or(u32::MAX);
        let incorrect_count = total_count.saturating_sub(correct_count);

        ScoreTally {
            correct_count,
            incorrect_count,
            score_percentage: Self::percentage(correct_count, total_count),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn percentage(correct: u32, total: u32) -> u8 {
        if total == 0 {
            return 0;
        }
        // Half-up: .5 boundaries round away from zero, so 2.5% -> 3%.
        let scaled = (f64::from(correct) / f64::from(total)) * 100.0;
        scaled.round() as u8
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
