//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::ValidationError;
use storage::StorageError;

use crate::quiz::QuizPhase;

/// Errors emitted by the quiz session state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action} while {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: QuizPhase,
    },
    #[error("no game in progress")]
    NotPlaying,
    #[error("answer slot {slot} is out of range")]
    InvalidSlot { slot: usize },
}

/// Errors emitted by `HighScoreService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HighScoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
