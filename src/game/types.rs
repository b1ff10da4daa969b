//! Core domain types for a guessing round.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a game session.
///
/// Async completions carry the id of the session that requested them so a
/// response arriving after a restart can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display)]
#[display("session#{}", _0)]
pub struct SessionId(u64);

impl SessionId {
    /// Allocates the next unused id.
    pub fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Guesses are being accepted.
    InProgress,
    /// The target was guessed.
    Won,
    /// The attempt budget ran out.
    Lost,
    /// The player gave up.
    ConcededLost,
}

impl SessionStatus {
    /// Returns true for `Won`, `Lost` and `ConcededLost`.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// Returns true only for `Won`.
    pub fn is_win(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Result of an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// The guess named the target; the session is won.
    Correct,
    /// Wrong guess, attempts remain.
    Incorrect,
    /// The guess was already rejected earlier; nothing was consumed.
    Repeated,
    /// Wrong guess that used the last attempt; the session is lost.
    OutOfAttempts,
}

impl GuessOutcome {
    /// Returns true if this outcome ended the session.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Correct | Self::OutOfAttempts)
    }
}
