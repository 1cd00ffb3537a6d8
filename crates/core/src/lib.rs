#![forbid(unsafe_code)]

pub mod bank;
pub mod model;
pub mod scoring;
pub mod shuffle;

pub use bank::QuestionBank;
pub use model::{DataIntegrityError, HighScoreEntry, Question, ValidationError};
pub use scoring::{QuizRules, score};
pub use shuffle::shuffle;
