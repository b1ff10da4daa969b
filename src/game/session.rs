//! The guessing session: an immutable value advanced by pure transitions.
//!
//! Every transition takes `&self` and returns a new session, so callers can
//! keep the previous value, compare the two, or throw the new one away.
//! Nothing here touches the network or the score store.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::contracts::{Contract, GuessContract, SessionInProgress};
use super::error::SessionError;
use super::names::{ValidNameSet, canonical_name};
use super::types::{GuessOutcome, SessionId, SessionStatus};
use crate::species::{SpeciesDescriptor, select_source_text};
use crate::translation::Language;

/// Attempts a fresh session starts with unless configured otherwise.
pub const DEFAULT_ATTEMPT_BUDGET: u8 = 3;

/// Knobs for starting a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Wrong guesses allowed before the session is lost (at least 1).
    pub attempt_budget: u8,
    /// Language the description is shown in.
    pub display_language: Language,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            display_language: Language::default(),
        }
    }
}

/// One round of the guessing game.
#[derive(Debug, Clone)]
pub struct GameSession {
    id: SessionId,
    target: Arc<SpeciesDescriptor>,
    target_name: String,
    source_text: String,
    valid_names: Arc<ValidNameSet>,
    attempts_remaining: u8,
    rejected_guesses: BTreeSet<String>,
    status: SessionStatus,
    display_language: Language,
}

impl GameSession {
    /// Starts a session for `target`.
    ///
    /// Picks the round's source text from the target's descriptions (see
    /// [`select_source_text`]).
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoDescriptorAvailable`] if the target has no
    /// description in the source language; the caller should pick another
    /// species.
    #[instrument(skip(target, valid_names, rng), fields(species = %target.name(), pool = valid_names.len()))]
    pub fn start<R: Rng + ?Sized>(
        target: Arc<SpeciesDescriptor>,
        valid_names: Arc<ValidNameSet>,
        settings: SessionSettings,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let source_text = select_source_text(&target, Language::SOURCE.code(), rng)
            .ok_or_else(|| {
                warn!("Species has no source-language description");
                SessionError::NoDescriptorAvailable
            })?;

        let session = Self {
            id: SessionId::next(),
            target_name: target.canonical_name(),
            target,
            source_text,
            valid_names,
            attempts_remaining: settings.attempt_budget.max(1),
            rejected_guesses: BTreeSet::new(),
            status: SessionStatus::InProgress,
            display_language: settings.display_language,
        };

        info!(
            session_id = %session.id,
            attempts = session.attempts_remaining,
            language = %session.display_language,
            "Session started"
        );
        Ok(session)
    }

    /// Applies a guess and returns the advanced session with the outcome.
    ///
    /// The raw text is trimmed, case-folded and stripped of a gender suffix
    /// before comparison. A guess that was already rejected costs nothing.
    ///
    /// # Errors
    ///
    /// - [`SessionError::SessionAlreadyOver`] on a terminal session.
    /// - [`SessionError::InvalidGuess`] if the name is not in the pool.
    ///
    /// In both cases `self` is untouched and no attempt is consumed.
    #[instrument(skip(self), fields(session_id = %self.id, attempts = self.attempts_remaining))]
    pub fn submit_guess(&self, raw: &str) -> Result<(Self, GuessOutcome), SessionError> {
        let guess = canonical_name(raw);
        GuessContract::pre(self, guess.as_str())?;

        if self.rejected_guesses.contains(&guess) {
            debug!(%guess, "Guess already rejected");
            return Ok((self.clone(), GuessOutcome::Repeated));
        }

        let mut next = self.clone();
        let outcome = if guess == self.target_name {
            next.status = SessionStatus::Won;
            GuessOutcome::Correct
        } else {
            next.rejected_guesses.insert(guess.clone());
            next.attempts_remaining = next.attempts_remaining.saturating_sub(1);
            if next.attempts_remaining == 0 {
                next.status = SessionStatus::Lost;
                GuessOutcome::OutOfAttempts
            } else {
                GuessOutcome::Incorrect
            }
        };

        #[cfg(debug_assertions)]
        GuessContract::post(self, &next)?;

        info!(
            %guess,
            ?outcome,
            status = ?next.status,
            attempts = next.attempts_remaining,
            "Guess applied"
        );
        Ok((next, outcome))
    }

    /// Gives up the round.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::SessionAlreadyOver`] unless the session is in
    /// progress.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn concede(&self) -> Result<Self, SessionError> {
        SessionInProgress::check(self)?;
        let mut next = self.clone();
        next.status = SessionStatus::ConcededLost;
        info!("Session conceded");
        Ok(next)
    }

    /// Returns a copy showing its description in `language`.
    ///
    /// Never affects status or attempts.
    #[instrument(skip(self), fields(session_id = %self.id))]
    pub fn with_display_language(&self, language: Language) -> Self {
        let mut next = self.clone();
        next.display_language = language;
        next
    }

    /// Identity used to match async completions to this session.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The round's answer.
    pub fn target(&self) -> &Arc<SpeciesDescriptor> {
        &self.target
    }

    /// Canonical form of the answer's name.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Description text selected for this round, in the source language.
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    /// Pool of names a guess may take.
    pub fn valid_names(&self) -> &ValidNameSet {
        &self.valid_names
    }

    /// Wrong guesses still allowed.
    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    /// Canonical names already guessed wrong.
    pub fn rejected_guesses(&self) -> &BTreeSet<String> {
        &self.rejected_guesses
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Language the description is shown in.
    pub fn display_language(&self) -> Language {
        self.display_language
    }
}
