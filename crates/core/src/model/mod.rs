mod attempt;
mod category;
mod difficulty;
mod ids;
mod profile;
mod progress;
mod question;
mod result;
mod session;
mod wrong_note;

pub use ids::{CategoryId, ParseIdError, ProfileId, QuestionId};

pub use attempt::QuizAttempt;
pub use category::{Category, CategoryError};
pub use difficulty::{Difficulty, DifficultyError};
pub use profile::{Profile, ProfileError};
pub use progress::CategoryProgress;
pub use question::{Question, QuestionError};
pub use result::{SessionResult, SessionResultError};
pub use session::{AnswerRecord, DEFAULT_TIME_LIMIT_SECS, SessionConfig};
pub use wrong_note::{
    Choice, LearningRecommendation, NO_ANSWER, NO_EXPLANATION, WrongNote, choice_label,
};
