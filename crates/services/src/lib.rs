#![forbid(unsafe_code)]

pub mod category_service;
pub mod error;
pub mod profile_service;
pub mod question_service;
pub mod sessions;
pub mod stats_service;
pub mod wrong_note_service;

pub use quiz_core::Clock;

pub use error::{
    CategoryServiceError, ProfileServiceError, QuestionServiceError, SessionError,
    StatsServiceError, WrongNoteServiceError,
};

pub use category_service::CategoryService;
pub use profile_service::ProfileService;
pub use question_service::QuestionService;
pub use stats_service::StatsService;
pub use wrong_note_service::WrongNoteService;

pub use sessions::{
    AdvanceOutcome, AnswerRecorder, Countdown, QuestionSetProvider, ScoreTally, ScoringEngine,
    SessionController, SessionProgress, SessionState, SessionWorkflow, StartOutcome, TickOutcome,
    TimeBudget, WrongNoteGenerator, format_mm_ss,
};
