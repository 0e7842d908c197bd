use chrono::{DateTime, Utc};

use crate::model::ids::{CategoryId, ProfileId};

/// Running per-profile, per-category attempt tallies for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProgress {
    pub profile_id: ProfileId,
    pub category_id: CategoryId,
    pub total_attempts: u32,
    pub correct_attempts: u32,
    pub last_attempted_at: Option<DateTime<Utc>>,
}

impl CategoryProgress {
    /// Fresh progress with zero attempts.
    #[must_use]
    pub fn empty(profile_id: ProfileId, category_id: CategoryId) -> Self {
        Self {
            profile_id,
            category_id,
            total_attempts: 0,
            correct_attempts: 0,
            last_attempted_at: None,
        }
    }

    /// Accumulate one completed session's tallies.
    pub fn record_attempts(&mut self, total: u32, correct: u32, at: DateTime<Utc>) {
        self.total_attempts = self.total_attempts.saturating_add(total);
        self.correct_attempts = self.correct_attempts.saturating_add(correct);
        self.last_attempted_at = Some(at);
    }

    /// Fraction of correct attempts, 0.0 when nothing was attempted yet.
    #[must_use]
    pub fn correct_rate(&self) -> f64 {
        if self.total_attempts == 0 {
            return 0.0;
        }
        f64::from(self.correct_attempts) / f64::from(self.total_attempts)
    }
}
