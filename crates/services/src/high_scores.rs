use std::sync::Arc;

use quiz_core::HighScoreEntry;
use storage::{KeyValueStore, StorageError};

use crate::error::HighScoreError;

/// Key under which the whole high-score list is stored.
pub const HIGH_SCORES_KEY: &str = "scores";

/// Ranked high-score list persisted as one JSON array in a key-value store.
///
/// This is the only writer of the list; every change rewrites it in full.
#[derive(Clone)]
pub struct HighScoreService {
    kv: Arc<dyn KeyValueStore>,
}

impl HighScoreService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Record a score and return the updated ranking.
    ///
    /// # Errors
    ///
    /// Returns `HighScoreError::Validation` when `initials` is blank; the stored
    /// list is left untouched in that case. Returns `HighScoreError::Storage`
    /// if the store cannot be read or written.
    pub async fn submit(
        &self,
        initials: &str,
        score: u32,
    ) -> Result<Vec<HighScoreEntry>, HighScoreError> {
        let entry = HighScoreEntry::new(initials, score)?;

        let mut entries = self.list().await?;
        entries.push(entry);
        // Stable: an equal score lands after the ones already recorded.
        entries.sort_by(|a, b| b.score().cmp(&a.score()));

        let raw = serde_json::to_string(&entries)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        self.kv.set(HIGH_SCORES_KEY, &raw).await?;

        tracing::info!(initials = initials.trim(), score, "high score recorded");
        Ok(entries)
    }

    /// The stored ranking, or an empty list if nothing has been stored.
    ///
    /// # Errors
    ///
    /// Returns `HighScoreError::Storage` only if the store itself fails.
    /// Unreadable stored data, including entries with blank initials, is
    /// treated as an empty list.
    pub async fn list(&self) -> Result<Vec<HighScoreEntry>, HighScoreError> {
        let Some(raw) = self.kv.get(HIGH_SCORES_KEY).await? else {
            return Ok(Vec::new());
        };
        Ok(decode_entries(&raw))
    }

    /// Remove every stored entry.
    ///
    /// # Errors
    ///
    /// Returns `HighScoreError::Storage` if the store cannot be written.
    pub async fn clear(&self) -> Result<(), HighScoreError> {
        self.kv.remove(HIGH_SCORES_KEY).await?;
        tracing::info!("high scores cleared");
        Ok(())
    }
}

fn decode_entries(raw: &str) -> Vec<HighScoreEntry> {
    match serde_json::from_str::<Vec<HighScoreEntry>>(raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(error = %err, "ignoring malformed high score data");
            Vec::new()
        }
    }
}
