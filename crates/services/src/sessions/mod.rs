mod controller;
mod countdown;
mod notes;
mod progress;
mod provider;
mod recorder;
mod scoring;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{
    AdvanceOutcome, SessionController, SessionState, StartOutcome, TickOutcome,
};
pub use countdown::{Countdown, TimeBudget};
pub use notes::WrongNoteGenerator;
pub use progress::{SessionProgress, format_mm_ss};
pub use provider::QuestionSetProvider;
pub use recorder::AnswerRecorder;
pub use scoring::{ScoreTally, ScoringEngine};
pub use workflow::SessionWorkflow;
