#![forbid(unsafe_code)]

pub mod error;
pub mod high_scores;
pub mod quiz;

pub use error::{HighScoreError, SessionError};
pub use high_scores::{HIGH_SCORES_KEY, HighScoreService};
pub use quiz::{
    AnswerOutcome, Feedback, ManualScheduler, PresentedQuestion, QuizController, QuizPhase,
    QuizResult, QuizSession, QuizSnapshot, Scheduler, Step, TaskHandle, TaskId, TickOutcome,
    TimerFired, TimerKind,
};
