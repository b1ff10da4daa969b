//! Per-generation win/loss records.

mod board;
mod store;

pub use board::ScoreBoard;
pub use store::{InMemoryScoreStore, JsonFileScoreStore, ScoreError, ScoreMap, ScoreRecord, ScoreStore};
