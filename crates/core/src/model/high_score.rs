use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("You need to type at least one character for your initials.")]
    EmptyInitials,
}

/// A persisted `{initials, score}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HighScoreRecord")]
pub struct HighScoreEntry {
    initials: String,
    score: u32,
}

impl HighScoreEntry {
    /// Create an entry from user-typed initials. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyInitials` if nothing is left after trimming.
    pub fn new(initials: &str, score: u32) -> Result<Self, ValidationError> {
        let initials = initials.trim();
        if initials.is_empty() {
            return Err(ValidationError::EmptyInitials);
        }
        Ok(Self {
            initials: initials.to_owned(),
            score,
        })
    }

    #[must_use]
    pub fn initials(&self) -> &str {
        &self.initials
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Stored shape of a [`HighScoreEntry`], before validation.
#[derive(Debug, Deserialize)]
struct HighScoreRecord {
    initials: String,
    score: u32,
}

impl TryFrom<HighScoreRecord> for HighScoreEntry {
    type Error = ValidationError;

    fn try_from(record: HighScoreRecord) -> Result<Self, Self::Error> {
        Self::new(&record.initials, record.score)
    }
}
