mod high_score;
mod question;

pub use high_score::{HighScoreEntry, ValidationError};
pub use question::{DataIntegrityError, MIN_DISTRACTORS, Question, QuestionRecord};
