use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum number of incorrect options a question must carry.
pub const MIN_DISTRACTORS: usize = 3;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Defects in question data, detected when a bank is loaded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DataIntegrityError {
    #[error("not enough distractors for question #{index}: found {found}, need {MIN_DISTRACTORS}")]
    NotEnoughDistractors { index: usize, found: usize },

    #[error("question #{index} has empty text")]
    EmptyQuestion { index: usize },

    #[error("question #{index} has an empty answer")]
    EmptyAnswer { index: usize },

    #[error("malformed question data: {0}")]
    Malformed(String),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Raw, unvalidated shape of a question as it appears in question files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub answer: String,
    pub distractors: Vec<String>,
}

/// A multiple-choice question.
///
/// Text fields may embed simple inline markup (`<code>`, `<em>`); rendering is
/// left to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    question: String,
    answer: String,
    distractors: Vec<String>,
}

impl Question {
    /// Build a question, checking it carries at least [`MIN_DISTRACTORS`] distractors.
    ///
    /// `index` is the position of the question in its bank and is only used
    /// to label errors.
    ///
    /// # Errors
    ///
    /// Returns `DataIntegrityError` if the text or answer is blank, or if there
    /// are fewer than three distractors.
    pub fn new(
        index: usize,
        question: impl Into<String>,
        answer: impl Into<String>,
        distractors: Vec<String>,
    ) -> Result<Self, DataIntegrityError> {
        let question = question.into();
        let answer = answer.into();

        if question.trim().is_empty() {
            return Err(DataIntegrityError::EmptyQuestion { index });
        }
        if answer.trim().is_empty() {
            return Err(DataIntegrityError::EmptyAnswer { index });
        }
        if distractors.len() < MIN_DISTRACTORS {
            return Err(DataIntegrityError::NotEnoughDistractors {
                index,
                found: distractors.len(),
            });
        }

        Ok(Self {
            question,
            answer,
            distractors,
        })
    }

    /// Validate a raw record.
    ///
    /// # Errors
    ///
    /// Same as [`Question::new`].
    pub fn from_record(index: usize, record: QuestionRecord) -> Result<Self, DataIntegrityError> {
        Self::new(index, record.question, record.answer, record.distractors)
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn distractors(&self) -> &[String] {
        &self.distractors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn accepts_three_distractors() {
        let q = Question::new(0, "Q", "A", strings(&["x", "y", "z"])).unwrap();
        assert_eq!(q.question(), "Q");
        assert_eq!(q.answer(), "A");
        assert_eq!(q.distractors().len(), 3);
    }

    #[test]
    fn rejects_too_few_distractors() {
        let err = Question::new(4, "Q", "A", strings(&["x", "y"])).unwrap_err();
        assert_eq!(
            err,
            DataIntegrityError::NotEnoughDistractors { index: 4, found: 2 }
        );
    }

    #[test]
    fn rejects_blank_answer() {
        let err = Question::new(1, "Q", "  ", strings(&["x", "y", "z"])).unwrap_err();
        assert_eq!(err, DataIntegrityError::EmptyAnswer { index: 1 });
    }
}
