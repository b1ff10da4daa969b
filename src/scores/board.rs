//! Score aggregation over an explicitly passed store handle.

use tracing::{debug, info, instrument, warn};

use super::{ScoreError, ScoreMap, ScoreRecord, ScoreStore};

/// Per-generation win/loss record, loaded once and persisted on every change.
#[derive(Debug)]
pub struct ScoreBoard<S> {
    store: S,
    scores: ScoreMap,
}

impl<S: ScoreStore> ScoreBoard<S> {
    /// Loads the board from `store`.
    ///
    /// A store that cannot be read yields an empty board and a warning.
    #[instrument(skip(store))]
    pub fn load(store: S) -> Self {
        let scores = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "Could not load scores, starting empty");
            ScoreMap::new()
        });
        info!(keys = scores.len(), "Score board loaded");
        Self { store, scores }
    }

    /// Counts one outcome for `key`, creating a zeroed record if needed,
    /// and persists the whole map.
    ///
    /// The in-memory tally is updated even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError`] if the store rejects the save.
    #[instrument(skip(self))]
    pub fn record_outcome(&mut self, key: &str, is_win: bool) -> Result<ScoreRecord, ScoreError> {
        let record = self.scores.entry(key.to_string()).or_default();
        record.tally(is_win);
        let updated = *record;
        debug!(wins = updated.wins(), losses = updated.losses(), "Outcome tallied");
        self.store.save(&self.scores)?;
        Ok(updated)
    }

    /// Record for `key`, zeroed if none exists.
    pub fn record(&self, key: &str) -> ScoreRecord {
        self.scores.get(key).copied().unwrap_or_default()
    }

    /// `"wins/total"` for `key`; `"0/0"` when nothing was recorded.
    pub fn success_rate(&self, key: &str) -> String {
        let record = self.record(key);
        format!("{}/{}", record.wins(), record.total())
    }

    /// All records, sorted by key.
    pub fn summary(&self) -> impl Iterator<Item = (&str, &ScoreRecord)> {
        self.scores.iter().map(|(key, record)| (key.as_str(), record))
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
