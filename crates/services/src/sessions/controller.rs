use chrono::{DateTime, Utc};

use quiz_core::model::{AnswerRecord, Question, SessionConfig, SessionResult};

use super::countdown::{Countdown, TimeBudget};
use super::notes::WrongNoteGenerator;
use super::progress::SessionProgress;
use super::provider::QuestionSetProvider;
use super::recorder::AnswerRecorder;
use super::scoring::ScoringEngine;
use crate::error::SessionError;

/// Lifecycle state of one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading,
    Presenting(usize),
    Completed,
    Abandoned,
    /// The question set was empty at start; terminal, not an error.
    NoContent,
}

/// What `start` observed after loading the question set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    NoContent,
}

/// What `advance` did with the committed answer.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Moved on to the question at this index.
    Next(usize),
    /// That was the last question; the session result, handed out once.
    Completed(SessionResult),
}

/// What a timer tick observed.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Running(TimeBudget),
    /// The limit was reached; the session was force-completed.
    Expired(SessionResult),
    /// The session is not presenting; the tick was ignored.
    Inactive,
}

/// State machine for one quiz run: `Idle → Loading → Presenting(i)` and then
/// one of `Completed`, `Abandoned` or `NoContent`.
///
/// The controller owns the question set, the countdown and the answer
/// recorder, and is driven synchronously from the caller's event loop —
/// `start` is the only suspension point. The `&mut self` receivers are what
/// serialize `advance` against `tick`: a session is single-threaded by
/// construction, which is why an expiring tick and a final answer can never
/// race. Retrying a finished quiz means building a fresh controller; nothing
/// carries over.
pub struct SessionController {
    config: SessionConfig,
    category_name: String,
    questions: Vec<Question>,
    state: SessionState,
    recorder: AnswerRecorder,
    countdown: Countdown,
}

impl SessionController {
    #[must_use]
    pub fn new(config: SessionConfig, category_name: impl Into<String>) -> Self {
        Self {
            countdown: Countdown::new(config.time_limit()),
            config,
            category_name: category_name.into(),
            questions: Vec::new(),
            state: SessionState::Idle,
            recorder: AnswerRecorder::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.state {
            SessionState::Presenting(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// Committed records so far (all of them once the session is terminal).
    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        self.recorder.records()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.questions.len();
        let answered = self.recorder.answered_count();
        SessionProgress {
            total,
            answered,
            remaining: total.saturating_sub(answered),
            is_complete: matches!(self.state, SessionState::Completed),
        }
    }

    /// Load the question set and begin presenting.
    ///
    /// An empty set lands in the terminal `NoContent` state without starting
    /// the countdown. A repository failure leaves the controller in `Idle`
    /// so the caller may retry.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` if called twice, and
    /// `SessionError::Storage` when loading fails.
    pub async fn start(
        &mut self,
        provider: &QuestionSetProvider,
        now: DateTime<Utc>,
    ) -> Result<StartOutcome, SessionError> {
        if self.state != SessionState::Idle {
            return Err(SessionError::AlreadyStarted);
        }

        self.state = SessionState::Loading;
        let questions = match provider
            .load(self.config.category_id(), self.config.difficulty())
            .await
        {
            Ok(questions) => questions,
            Err(e) => {
                self.state = SessionState::Idle;
                return Err(e);
            }
        };

        if questions.is_empty() {
            self.state = SessionState::NoContent;
            return Ok(StartOutcome::NoContent);
        }

        self.questions = questions;
        self.state = SessionState::Presenting(0);
        self.countdown.start(now);
        Ok(StartOutcome::Started)
    }

    /// Set or overwrite the pending choice for the question on screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidOption` when the index does not address
    /// an option of the current question, and a state error when the session
    /// is not presenting.
    pub fn select_option(&mut self, index: usize) -> Result<(), SessionError> {
        let question = self.require_presenting()?;
        let option_count = question.options().len();
        if index >= option_count {
            return Err(SessionError::InvalidOption {
                index,
                option_count,
            });
        }
        self.recorder.select(Some(index));
        Ok(())
    }

    /// Drop the pending choice so advancing records an explicit non-answer.
    ///
    /// # Errors
    ///
    /// Returns a state error when the session is not presenting.
    pub fn clear_selection(&mut self) -> Result<(), SessionError> {
        self.require_presenting()?;
        self.recorder.select(None);
        Ok(())
    }

    /// Commit the pending selection for the current question and move on.
    ///
    /// On the last question this completes the session and yields the
    /// `SessionResult` by value; it is produced exactly once.
    ///
    /// # Errors
    ///
    /// Returns a state error when the session is not presenting.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        let SessionState::Presenting(index) = self.state else {
            return Err(self.state_error());
        };
        // Presenting(index) always addresses a question.
        let question = &self.questions[index];
        self.recorder.commit(question);

        let next = index + 1;
        if next < self.questions.len() {
            self.state = SessionState::Presenting(next);
            return Ok(AdvanceOutcome::Next(next));
        }

        let result = self.complete(now)?;
        Ok(AdvanceOutcome::Completed(result))
    }

    /// Observe the countdown; on expiry, force-complete the session.
    ///
    /// Expiry commits the current question's pending selection as-is and
    /// records an explicit non-answer for every question never reached, so
    /// the result still covers the whole set. Ticks outside `Presenting` are
    /// no-ops.
    ///
    /// # Errors
    ///
    /// Propagates result-assembly failures, which a well-formed session
    /// cannot produce.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Result<TickOutcome, SessionError> {
        let SessionState::Presenting(index) = self.state else {
            return Ok(TickOutcome::Inactive);
        };

        let budget = self.countdown.tick(now);
        if !self.countdown.has_expired() {
            return Ok(TickOutcome::Running(budget));
        }

        let question = &self.questions[index];
        self.recorder.commit(question);
        self.recorder.fill_unanswered(self.questions.len());
        let result = self.complete(now)?;
        Ok(TickOutcome::Expired(result))
    }

    /// Walk away from the session: the countdown stops and no result is
    /// produced. Partial records are discarded. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` when the session already finished.
    pub fn abandon(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Completed => Err(SessionError::Completed),
            SessionState::Abandoned | SessionState::NoContent => Ok(()),
            _ => {
                self.countdown.stop();
                self.state = SessionState::Abandoned;
                Ok(())
            }
        }
    }

    fn complete(&mut self, now: DateTime<Utc>) -> Result<SessionResult, SessionError> {
        let budget = self.countdown.tick(now);
        self.countdown.stop();

        let tally = ScoringEngine::tally(self.recorder.records(), self.questions.len());
        let notes = WrongNoteGenerator::generate(
            &self.questions,
            self.recorder.records(),
            &self.category_name,
            now,
        );
        let result = SessionResult::new(
            tally.correct_count,
            tally.incorrect_count,
            budget.elapsed,
            tally.score_percentage,
            notes,
        )?;
        self.state = SessionState::Completed;
        Ok(result)
    }

    fn require_presenting(&self) -> Result<&Question, SessionError> {
        match self.state {
            SessionState::Presenting(index) => Ok(&self.questions[index]),
            _ => Err(self.state_error()),
        }
    }

    fn state_error(&self) -> SessionError {
        match self.state {
            SessionState::Idle | SessionState::Loading => SessionError::NotStarted,
            SessionState::Abandoned => SessionError::Abandoned,
            _ => SessionError::Completed,
        }
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("state", &self.state)
            .field("questions_len", &self.questions.len())
            .field("answered", &self.recorder.answered_count())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{CategoryId, Difficulty, NO_ANSWER, ProfileId, QuestionId};
    use quiz_core::time::fixed_now;
    use std::sync::Arc;
    use storage::repository::{InMemoryRepository, QuestionRepository};

    fn build_question(id: u64, prompt: &str, correct_index: usize) -> Question {
        Question::new(
            QuestionId::new(id),
            CategoryId::new(1),
            prompt,
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            correct_index,
            None,
            Difficulty::Level2,
            None,
            fixed_now(),
        )
        .unwrap()
    }

    fn config() -> SessionConfig {
        SessionConfig::new(ProfileId::new(1), CategoryId::new(1), Difficulty::Level2)
    }

    async fn provider_with(questions: &[Question]) -> QuestionSetProvider {
        let repo = InMemoryRepository::new();
        for question in questions {
            repo.upsert_question(question).await.unwrap();
        }
        QuestionSetProvider::new(Arc::new(repo))
    }

    async fn started_controller(questions: &[Question]) -> SessionController {
        let provider = provider_with(questions).await;
        let mut controller = SessionController::new(config(), "Swift");
        let outcome = controller.start(&provider, fixed_now()).await.unwrap();
        assert_eq!(outcome, StartOutcome::Started);
        controller
    }

    // Scenario: three questions answered right, wrong, and skipped.
    #[tokio::test]
    async fn happy_path_scores_and_notes() {
        let questions = [
            build_question(1, "q1", 0),
            build_question(2, "q2", 1),
            build_question(3, "q3", 2),
        ];
        let mut controller = started_controller(&questions).await;

        controller.select_option(0).unwrap();
        assert_eq!(
            controller.advance(fixed_now()).unwrap(),
            AdvanceOutcome::Next(1)
        );

        controller.select_option(0).unwrap();
        assert_eq!(
            controller.advance(fixed_now()).unwrap(),
            AdvanceOutcome::Next(2)
        );

        let outcome = controller
            .advance(fixed_now() + Duration::seconds(120))
            .unwrap();
        let AdvanceOutcome::Completed(result) = outcome else {
            panic!("expected completion");
        };

        assert_eq!(result.correct_count(), 1);
        assert_eq!(result.incorrect_count(), 2);
        assert_eq!(result.score_percentage(), 33);
        assert_eq!(result.elapsed(), Duration::seconds(120));
        assert_eq!(result.wrong_notes().len(), 2);
        assert_eq!(result.wrong_notes()[0].question(), "q2");
        assert_eq!(result.wrong_notes()[1].user_answer(), NO_ANSWER);
        assert_eq!(controller.state(), SessionState::Completed);
    }

    #[tokio::test]
    async fn empty_set_is_no_content_not_error() {
        let provider = provider_with(&[]).await;
        let mut controller = SessionController::new(config(), "Swift");

        let outcome = controller.start(&provider, fixed_now()).await.unwrap();
        assert_eq!(outcome, StartOutcome::NoContent);
        assert_eq!(controller.state(), SessionState::NoContent);

        let tick = controller
            .tick(fixed_now() + Duration::seconds(1))
            .unwrap();
        assert_eq!(tick, TickOutcome::Inactive);
    }

    #[tokio::test]
    async fn start_twice_is_rejected() {
        let questions = [build_question(1, "q1", 0)];
        let provider = provider_with(&questions).await;
        let mut controller = SessionController::new(config(), "Swift");
        controller.start(&provider, fixed_now()).await.unwrap();

        let err = controller.start(&provider, fixed_now()).await.unwrap_err();
        assert!(matches!(err, SessionError::AlreadyStarted));
    }

    // Scenario: timer expires mid-session with a pending selection.
    #[tokio::test]
    async fn timeout_forces_completion_with_unanswered_tail() {
        let questions = [
            build_question(1, "q1", 0),
            build_question(2, "q2", 0),
            build_question(3, "q3", 0),
        ];
        let mut controller = started_controller(&questions).await;

        controller.select_option(0).unwrap();
        controller.advance(fixed_now()).unwrap();
        // Pending on q2, q3 never reached.
        controller.select_option(0).unwrap();

        let tick = controller
            .tick(fixed_now() + Duration::seconds(601))
            .unwrap();
        let TickOutcome::Expired(result) = tick else {
            panic!("expected expiry");
        };

        assert_eq!(result.total_questions(), 3);
        assert_eq!(result.correct_count(), 2);
        assert_eq!(result.incorrect_count(), 1);
        assert_eq!(result.elapsed(), Duration::seconds(600));
        assert_eq!(result.wrong_notes().len(), 1);
        assert!(result.wrong_notes()[0].is_unanswered());
        assert_eq!(controller.state(), SessionState::Completed);
    }

    #[tokio::test]
    async fn tick_after_completion_is_inactive() {
        let questions = [build_question(1, "q1", 0)];
        let mut controller = started_controller(&questions).await;
        controller.select_option(0).unwrap();
        controller.advance(fixed_now()).unwrap();

        let tick = controller
            .tick(fixed_now() + Duration::seconds(9999))
            .unwrap();
        assert_eq!(tick, TickOutcome::Inactive);
    }

    #[tokio::test]
    async fn out_of_range_selection_is_a_typed_error() {
        let questions = [build_question(1, "q1", 0)];
        let mut controller = started_controller(&questions).await;

        let err = controller.select_option(7).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidOption {
                index: 7,
                option_count: 3,
            }
        ));

        // The session is still usable afterwards.
        controller.select_option(1).unwrap();
        assert!(matches!(
            controller.advance(fixed_now()),
            Ok(AdvanceOutcome::Completed(_))
        ));
    }

    #[tokio::test]
    async fn reselection_before_advance_wins() {
        let questions = [build_question(1, "q1", 2)];
        let mut controller = started_controller(&questions).await;

        controller.select_option(0).unwrap();
        controller.select_option(2).unwrap();
        let AdvanceOutcome::Completed(result) = controller.advance(fixed_now()).unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(result.correct_count(), 1);
    }

    #[tokio::test]
    async fn abandon_discards_everything() {
        let questions = [build_question(1, "q1", 0), build_question(2, "q2", 0)];
        let mut controller = started_controller(&questions).await;
        controller.select_option(0).unwrap();
        controller.advance(fixed_now()).unwrap();

        controller.abandon().unwrap();
        controller.abandon().unwrap();
        assert_eq!(controller.state(), SessionState::Abandoned);

        let err = controller.select_option(0).unwrap_err();
        assert!(matches!(err, SessionError::Abandoned));
        assert_eq!(
            controller.tick(fixed_now()).unwrap(),
            TickOutcome::Inactive
        );
    }

    #[tokio::test]
    async fn actions_before_start_are_rejected() {
        let mut controller = SessionController::new(config(), "Swift");
        assert!(matches!(
            controller.select_option(0).unwrap_err(),
            SessionError::NotStarted
        ));
        assert!(matches!(
            controller.advance(fixed_now()).unwrap_err(),
            SessionError::NotStarted
        ));
    }
}
