use quiz_core::HighScoreEntry;
use services::{HighScoreError, HighScoreService};

use crate::views::ViewError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighScoreRowVm {
    /// 1-based position in the ranking.
    pub rank: usize,
    pub label: String,
}

#[must_use]
pub fn map_high_score_rows(entries: &[HighScoreEntry]) -> Vec<HighScoreRowVm> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| HighScoreRowVm {
            rank: idx + 1,
            label: format!("{}: {}", entry.initials(), entry.score()),
        })
        .collect()
}

/// Save a finished game's score.
///
/// # Errors
///
/// Returns the message to show next to the initials field: the validation
/// message for blank initials, a generic one for storage failures.
pub async fn submit_high_score(
    high_scores: &HighScoreService,
    initials: &str,
    score: u32,
) -> Result<(), String> {
    match high_scores.submit(initials, score).await {
        Ok(_) => Ok(()),
        Err(HighScoreError::Validation(err)) => Err(err.to_string()),
        Err(err) => {
            tracing::warn!(%err, "saving high score failed");
            Err(ViewError::Unknown.message().to_string())
        }
    }
}
