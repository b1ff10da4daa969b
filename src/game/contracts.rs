//! Contract-based validation for guess transitions.
//!
//! Preconditions run on every guess; postconditions compare the session
//! before and after a transition and run in debug builds only.

use tracing::{instrument, warn};

use super::error::SessionError;
use super::session::GameSession;

/// Preconditions and postconditions for a session transition.
pub trait Contract<S, A: ?Sized> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), SessionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), SessionError>;
}

/// Precondition: the session still accepts input.
pub struct SessionInProgress;

impl SessionInProgress {
    /// Fails with [`SessionError::SessionAlreadyOver`] on a terminal session.
    #[instrument(skip(session), fields(session_id = %session.id()))]
    pub fn check(session: &GameSession) -> Result<(), SessionError> {
        if session.status().is_terminal() {
            Err(SessionError::SessionAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the canonical guess names a species of the active pool.
///
/// The target's own name is always accepted, even if the pool was built
/// from a roster that omits it.
pub struct GuessIsKnown;

impl GuessIsKnown {
    /// Fails with [`SessionError::InvalidGuess`] for unknown names.
    #[instrument(skip(session), fields(session_id = %session.id()))]
    pub fn check(session: &GameSession, guess: &str) -> Result<(), SessionError> {
        if guess == session.target_name() || session.valid_names().contains(guess) {
            Ok(())
        } else {
            Err(SessionError::InvalidGuess(guess.to_string()))
        }
    }
}

/// Contract for guess submissions; the action is the canonical guess.
pub struct GuessContract;

impl Contract<GameSession, str> for GuessContract {
    fn pre(session: &GameSession, guess: &str) -> Result<(), SessionError> {
        SessionInProgress::check(session)?;
        GuessIsKnown::check(session, guess)
    }

    fn post(before: &GameSession, after: &GameSession) -> Result<(), SessionError> {
        let mut violations = Vec::new();

        if after.id() != before.id() {
            violations.push("session identity changed");
        }
        if after.attempts_remaining() > before.attempts_remaining() {
            violations.push("attempts increased");
        }
        if !before.rejected_guesses().is_subset(after.rejected_guesses()) {
            violations.push("rejected guesses shrank");
        }
        if after.attempts_remaining() == 0 && !after.status().is_terminal() {
            violations.push("no attempts left but still in progress");
        }
        if before.status().is_terminal() && after.status() != before.status() {
            violations.push("left a terminal status");
        }

        if violations.is_empty() {
            Ok(())
        } else {
            warn!(?violations, session_id = %after.id(), "Guess postcondition failed");
            Err(SessionError::InvariantViolation(format!(
                "Postcondition failed: {}",
                violations.join("; ")
            )))
        }
    }
}
