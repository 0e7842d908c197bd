use chrono::Duration;
use thiserror::Error;

use crate::model::wrong_note::WrongNote;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionResultError {
    #[error("wrong note count ({notes}) does not match incorrect count ({incorrect})")]
    NoteCountMismatch { notes: usize, incorrect: u32 },

    #[error("score percentage {0} is outside 0-100")]
    PercentageOutOfRange(u8),

    #[error("elapsed time cannot be negative")]
    NegativeElapsed,
}

/// Terminal artifact of a completed session.
///
/// Built once when the session completes (by finishing or by timeout) and
/// immutable afterwards. `incorrect_count` covers both wrong answers and
/// questions left unanswered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    correct_count: u32,
    incorrect_count: u32,
    elapsed: Duration,
    score_percentage: u8,
    wrong_notes: Vec<WrongNote>,
}

impl SessionResult {
    /// Assemble a result, checking the cross-field invariants.
    ///
    /// # Errors
    ///
    /// Returns `SessionResultError::NoteCountMismatch` when the wrong-note
    /// list does not line up with `incorrect_count`,
    /// `SessionResultError::PercentageOutOfRange` for a score above 100, and
    /// `SessionResultError::NegativeElapsed` for a negative elapsed duration.
    pub fn new(
        correct_count: u32,
        incorrect_count: u32,
        elapsed: Duration,
        score_percentage: u8,
        wrong_notes: Vec<WrongNote>,
    ) -> Result<Self, SessionResultError> {
        if wrong_notes.len() != incorrect_count as usize {
            return Err(SessionResultError::NoteCountMismatch {
                notes: wrong_notes.len(),
                incorrect: incorrect_count,
            });
        }
        if score_percentage > 100 {
            return Err(SessionResultError::PercentageOutOfRange(score_percentage));
        }
        if elapsed < Duration::zero() {
            return Err(SessionResultError::NegativeElapsed);
        }

        Ok(Self {
            correct_count,
            incorrect_count,
            elapsed,
            score_percentage,
            wrong_notes,
        })
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn incorrect_count(&self) -> u32 {
        self.incorrect_count
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    #[must_use]
    pub fn score_percentage(&self) -> u8 {
        self.score_percentage
    }

    #[must_use]
    pub fn wrong_notes(&self) -> &[WrongNote] {
        &self.wrong_notes
    }

    /// Consume the result, handing ownership of the notes to the caller.
    #[must_use]
    pub fn into_wrong_notes(self) -> Vec<WrongNote> {
        self.wrong_notes
    }
}
