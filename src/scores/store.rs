//! Score persistence: the store seam and two implementations.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Win/loss tally for one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ScoreRecord {
    wins: u32,
    losses: u32,
}

impl ScoreRecord {
    /// Creates a record with the given counts.
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, losses }
    }

    /// Rounds played.
    pub fn total(&self) -> u32 {
        self.wins + self.losses
    }

    /// Adds one win or one loss.
    pub(crate) fn tally(&mut self, is_win: bool) {
        if is_win {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// Generation key to record.
pub type ScoreMap = BTreeMap<String, ScoreRecord>;

/// Durable home of the score map.
pub trait ScoreStore: Send {
    /// Reads the stored map; absent data yields an empty map.
    fn load(&self) -> Result<ScoreMap, ScoreError>;

    /// Replaces the stored map.
    fn save(&self, scores: &ScoreMap) -> Result<(), ScoreError>;
}

/// Score store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Score store error: {} at {}:{}", message, file, line)]
pub struct ScoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ScoreError {
    /// Creates a new score error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Store that lives only as long as the process; clones share the map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryScoreStore {
    scores: Arc<Mutex<ScoreMap>>,
}

impl InMemoryScoreStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with `scores`.
    pub fn with_scores(scores: ScoreMap) -> Self {
        Self {
            scores: Arc::new(Mutex::new(scores)),
        }
    }
}

impl ScoreStore for InMemoryScoreStore {
    fn load(&self) -> Result<ScoreMap, ScoreError> {
        let scores = self
            .scores
            .lock()
            .map_err(|e| ScoreError::new(format!("Score map lock poisoned: {}", e)))?;
        Ok(scores.clone())
    }

    fn save(&self, scores: &ScoreMap) -> Result<(), ScoreError> {
        let mut stored = self
            .scores
            .lock()
            .map_err(|e| ScoreError::new(format!("Score map lock poisoned: {}", e)))?;
        *stored = scores.clone();
        Ok(())
    }
}

/// Store backed by a JSON file.
///
/// A missing file reads as an empty map. A file that no longer parses is
/// logged and also read as empty. Saves go to a sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileScoreStore {
    path: PathBuf,
}

impl JsonFileScoreStore {
    /// Creates a store at `path`; the file is created on first save.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn new(path: impl AsRef<Path>) -> Self {
        info!("Creating JsonFileScoreStore");
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the score file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileScoreStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<ScoreMap, ScoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No score file yet");
                return Ok(ScoreMap::new());
            }
            Err(e) => return Err(ScoreError::new(format!("Failed to read score file: {}", e))),
        };

        match serde_json::from_str(&content) {
            Ok(scores) => Ok(scores),
            Err(e) => {
                warn!(error = %e, "Score file is corrupt, starting from empty scores");
                Ok(ScoreMap::new())
            }
        }
    }

    #[instrument(skip(self, scores), fields(path = %self.path.display(), keys = scores.len()))]
    fn save(&self, scores: &ScoreMap) -> Result<(), ScoreError> {
        let json = serde_json::to_string_pretty(scores)
            .map_err(|e| ScoreError::new(format!("Failed to serialize scores: {}", e)))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| ScoreError::new(format!("Failed to create score directory: {}", e)))?;
        }

        let staging = self.path.with_extension("json.tmp");
        std::fs::write(&staging, json)
            .map_err(|e| ScoreError::new(format!("Failed to write score file: {}", e)))?;
        std::fs::rename(&staging, &self.path)
            .map_err(|e| ScoreError::new(format!("Failed to replace score file: {}", e)))?;

        debug!("Scores saved");
        Ok(())
    }
}
