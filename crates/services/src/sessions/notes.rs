use chrono::{DateTime, Utc};

use quiz_core::model::{AnswerRecord, Question, WrongNote};

/// Builds wrong-answer notes from a finished session's records.
pub struct WrongNoteGenerator;

impl WrongNoteGenerator {
    /// One note per incorrect or unanswered record, in question order.
    ///
    /// Records are matched to questions by `question_index`; a record whose
    /// index does not address a question (which the controller never
    /// produces) is skipped rather than panicking.
    #[must_use]
    pub fn generate(
        questions: &[Question],
        records: &[AnswerRecord],
        category_name: &str,
        created_at: DateTime<Utc>,
    ) -> Vec<WrongNote> {
        records
            .iter()
            .filter(|record| !record.is_correct)
            .filter_map(|record| {
                questions.get(record.question_index).map(|question| {
                    WrongNote::from_question(question, record.selected, category_name, created_at)
                })
            })
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
