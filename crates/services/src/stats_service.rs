use std::sync::Arc;

use quiz_core::model::{CategoryProgress, ProfileId, QuizAttempt};
use storage::repository::{AttemptRepository, ProgressRepository};

use crate::error::StatsServiceError;

/// Read-side aggregation over attempts and per-category progress.
#[derive(Clone)]
pub struct StatsService {
    attempts: Arc<dyn AttemptRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl StatsService {
    #[must_use]
    pub fn new(attempts: Arc<dyn AttemptRepository>, progress: Arc<dyn ProgressRepository>) -> Self {
        Self { attempts, progress }
    }

    /// Percentage of correct attempts across every category, 0.0 when the
    /// profile has not attempted anything yet.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Storage` if repository access fails.
    #[allow(clippy::cast_precision_loss)]
    pub async fn overall_score_rate(&self, profile_id: ProfileId) -> Result<f64, StatsServiceError> {
        let rows = self.progress.list_progress(profile_id).await?;

        let total: u64 = rows.iter().map(|row| u64::from(row.total_attempts)).sum();
        if total == 0 {
            return Ok(0.0);
        }
        let correct: u64 = rows.iter().map(|row| u64::from(row.correct_attempts)).sum();

        Ok(correct as f64 / total as f64 * 100.0)
    }

    /// Per-category progress rows for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Storage` if repository access fails.
    pub async fn category_progress(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<CategoryProgress>, StatsServiceError> {
        Ok(self.progress.list_progress(profile_id).await?)
    }

    /// A profile's attempt history, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StatsServiceError::Storage` if repository access fails.
    pub async fn attempt_history(
        &self,
        profile_id: ProfileId,
    ) -> Result<Vec<QuizAttempt>, StatsServiceError> {
        Ok(self.attempts.list_attempts(profile_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::CategoryId;
    use quiz_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    fn build_service(repo: &InMemoryRepository) -> StatsService {
        StatsService::new(Arc::new(repo.clone()), Arc::new(repo.clone()))
    }

    #[tokio::test]
    async fn no_attempts_scores_zero() {
        let repo = InMemoryRepository::new();
        let service = build_service(&repo);

        let rate = service.overall_score_rate(ProfileId::new(1)).await.unwrap();
        assert!((rate - 0.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn score_rate_spans_categories() {
        let repo = InMemoryRepository::new();
        let profile = ProfileId::new(1);
        repo.record_attempts(profile, CategoryId::new(1), 4, 3, fixed_now())
            .await
            .unwrap();
        repo.record_attempts(profile, CategoryId::new(2), 6, 2, fixed_now())
            .await
            .unwrap();

        let service = build_service(&repo);
        let rate = service.overall_score_rate(profile).await.unwrap();
        assert!((rate - 50.0).abs() < f64::EPSILON);

        let rows = service.category_progress(profile).await.unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn score_rate_is_per_profile() {
        let repo = InMemoryRepository::new();
        repo.record_attempts(ProfileId::new(1), CategoryId::new(1), 2, 2, fixed_now())
            .await
            .unwrap();

        let service = build_service(&repo);
        let other = service.overall_score_rate(ProfileId::new(2)).await.unwrap();
        assert!((other - 0.0).abs() < f64::EPSILON);
    }
}
