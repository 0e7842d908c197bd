use quiz_core::model::{AnswerRecord, Question};

/// Collects exactly one immutable `AnswerRecord` per question, in question
/// order.
///
/// A pending selection can be changed freely until it is committed; after
/// commit the record is frozen. "No selection" is carried through explicitly
/// as `None`, never coerced to option 0.
#[derive(Debug, Default)]
pub struct AnswerRecorder {
    pending: Option<usize>,
    records: Vec<AnswerRecord>,
}

impl AnswerRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite the pending choice for the current question.
    pub fn select(&mut self, selected: Option<usize>) {
        self.pending = selected;
    }

    #[must_use]
    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    /// Freeze the pending selection (or `None`) against the current question,
    /// deciding correctness now. Clears the pending choice for the next
    /// question.
    pub fn commit(&mut self, question: &Question) -> AnswerRecord {
        let record = AnswerRecord::commit(self.records.len(), question, self.pending.take());
        self.records.push(record);
        record
    }

    /// Append explicit unanswered records until `total` questions are
    /// covered. Used when a timeout truncates the session.
    pub fn fill_unanswered(&mut self, total: usize) {
        while self.records.len() < total {
            let record = AnswerRecord::unanswered(self.records.len());
            self.records.push(record);
        }
    }

    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.records.len()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
