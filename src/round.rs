//! Round orchestration between the catalog, the translator, the score board
//! and the current session.
//!
//! The controller is the single owner of the session. Translation work is
//! handed out as [`TranslationRequest`] tickets and comes back as
//! [`TranslationResponse`]s; a response whose session id or language no
//! longer matches is dropped, so a slow translation can never paint the
//! description of a round that has since been replaced.

use std::sync::Arc;

use derive_more::{Display, Error, From};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, instrument, warn};

use crate::game::{GameSession, GuessOutcome, SessionError, SessionId, SessionSettings, ValidNameSet};
use crate::scores::{ScoreBoard, ScoreStore};
use crate::species::{GatewayError, Generation, RosterEntry, SpeciesGateway};
use crate::translation::{Language, TranslationRequest, TranslationResponse, Translator};

/// Species drawn before giving up on finding one with a usable description.
pub const MAX_REROLLS: usize = 5;

/// Anything that can stop a round intent from being applied.
#[derive(Debug, Clone, Display, Error, From)]
pub enum RoundError {
    /// The session refused the intent.
    #[display("{}", _0)]
    Session(SessionError),
    /// The catalog could not be reached (`GatewayUnavailable`).
    #[display("{}", _0)]
    Gateway(GatewayError),
}

/// Drives rounds for one player.
pub struct RoundController<S> {
    gateway: Arc<dyn SpeciesGateway>,
    translator: Arc<dyn Translator>,
    scores: ScoreBoard<S>,
    settings: SessionSettings,
    generation: Generation,
    roster: Vec<RosterEntry>,
    valid_names: Arc<ValidNameSet>,
    round_generation: Generation,
    session: Option<GameSession>,
    displayed_text: Option<String>,
    pending: Option<(SessionId, Language)>,
    rng: StdRng,
}

impl<S> std::fmt::Debug for RoundController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundController")
            .field("generation", &self.generation)
            .field("round_generation", &self.round_generation)
            .field("roster", &self.roster.len())
            .field("session", &self.session.as_ref().map(GameSession::id))
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl<S: ScoreStore> RoundController<S> {
    /// Creates a controller; call [`select_generation`](Self::select_generation)
    /// or [`start_round`](Self::start_round) before playing.
    #[instrument(skip(gateway, translator, scores))]
    pub fn new(
        gateway: Arc<dyn SpeciesGateway>,
        translator: Arc<dyn Translator>,
        scores: ScoreBoard<S>,
        settings: SessionSettings,
        generation: Generation,
    ) -> Self {
        info!("Creating RoundController");
        Self {
            gateway,
            translator,
            scores,
            settings,
            generation,
            roster: Vec::new(),
            valid_names: Arc::new(ValidNameSet::new()),
            round_generation: generation,
            session: None,
            displayed_text: None,
            pending: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replaces the random source, for reproducible species draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Selects `generation` for the next round, rebuilding its roster and
    /// name pool.
    ///
    /// On failure the previous generation stays selected. A round already in
    /// progress keeps its own generation and name pool, and is still scored
    /// under that generation; callers usually follow with
    /// [`start_round`](Self::start_round).
    ///
    /// # Errors
    ///
    /// Returns [`RoundError::Gateway`] if the roster cannot be fetched or is
    /// empty.
    #[instrument(skip(self))]
    pub async fn select_generation(&mut self, generation: Generation) -> Result<(), RoundError> {
        let roster = self.gateway.generation_roster(generation).await?;
        if roster.is_empty() {
            warn!("Generation roster is empty");
            return Err(GatewayError::new(format!("{} has no species", generation)).into());
        }

        let names: ValidNameSet = roster.iter().map(RosterEntry::name).collect();
        info!(species = roster.len(), names = names.len(), "Generation selected");

        self.generation = generation;
        self.roster = roster;
        self.valid_names = Arc::new(names);
        Ok(())
    }

    /// Starts a fresh round in the current generation.
    ///
    /// Draws species until one has a source-language description, up to
    /// [`MAX_REROLLS`] draws. Any previous session is replaced without being
    /// scored. Returns the translation ticket for the description, if the
    /// display language needs one.
    ///
    /// # Errors
    ///
    /// - [`RoundError::Gateway`] if the catalog is unreachable.
    /// - [`SessionError::NoDescriptorAvailable`] if every draw lacked a
    ///   description.
    #[instrument(skip(self), fields(generation = %self.generation))]
    pub async fn start_round(&mut self) -> Result<Option<TranslationRequest>, RoundError> {
        if self.roster.is_empty() {
            self.select_generation(self.generation).await?;
        }

        for draw in 1..=MAX_REROLLS {
            let Some(entry) = self.roster.choose(&mut self.rng).cloned() else {
                break;
            };
            let descriptor = self.gateway.species_descriptor(entry.name()).await?;

            match GameSession::start(
                Arc::new(descriptor),
                Arc::clone(&self.valid_names),
                self.settings,
                &mut self.rng,
            ) {
                Ok(session) => {
                    info!(draw, session_id = %session.id(), "Round started");
                    self.round_generation = self.generation;
                    self.session = Some(session);
                    return Ok(self.request_translation());
                }
                Err(SessionError::NoDescriptorAvailable) => {
                    debug!(draw, species = %entry.name(), "No usable description, re-rolling");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(draws = MAX_REROLLS, "Gave up finding a species with a description");
        Err(SessionError::NoDescriptorAvailable.into())
    }

    /// Starts a new round after the current one ended.
    #[instrument(skip(self))]
    pub async fn restart(&mut self) -> Result<Option<TranslationRequest>, RoundError> {
        self.start_round().await
    }

    /// Applies a guess; a terminal outcome is recorded on the score board.
    ///
    /// # Errors
    ///
    /// [`SessionError::SessionNotStarted`], or whatever the session rejects
    /// the guess with.
    #[instrument(skip(self))]
    pub fn submit_guess(&mut self, raw: &str) -> Result<GuessOutcome, RoundError> {
        let session = self.session.as_ref().ok_or(SessionError::SessionNotStarted)?;
        let (next, outcome) = session.submit_guess(raw)?;
        let status = next.status();
        self.session = Some(next);

        if outcome.is_terminal() {
            self.record(status.is_win());
        }
        Ok(outcome)
    }

    /// Gives up the current round and records the loss.
    ///
    /// # Errors
    ///
    /// [`SessionError::SessionNotStarted`] or
    /// [`SessionError::SessionAlreadyOver`].
    #[instrument(skip(self))]
    pub fn concede(&mut self) -> Result<(), RoundError> {
        let session = self.session.as_ref().ok_or(SessionError::SessionNotStarted)?;
        let next = session.concede()?;
        self.session = Some(next);
        self.record(false);
        Ok(())
    }

    /// Selects a new display language.
    ///
    /// Always issues a fresh translation ticket for the current target, even
    /// when re-selecting the language already shown.
    #[instrument(skip(self))]
    pub fn change_language(&mut self, language: Language) -> Option<TranslationRequest> {
        self.settings.display_language = language;
        self.session = self
            .session
            .as_ref()
            .map(|session| session.with_display_language(language));
        self.request_translation()
    }

    /// Applies a translation if it still belongs to the current session and
    /// language. Returns false when the response was stale and dropped.
    #[instrument(skip(self, response), fields(session_id = %response.session_id(), language = %response.language()))]
    pub fn apply_translation(&mut self, response: TranslationResponse) -> bool {
        if self.pending != Some((*response.session_id(), *response.language())) {
            debug!(pending = ?self.pending, "Discarding stale translation");
            return false;
        }
        self.pending = None;
        self.displayed_text = Some(response.text().clone());
        true
    }

    /// Runs `request` on this controller's translator and applies the result.
    #[instrument(skip(self, request))]
    pub async fn complete_translation(&mut self, request: TranslationRequest) -> bool {
        let response = request.fulfil(self.translator.as_ref()).await;
        self.apply_translation(response)
    }

    fn request_translation(&mut self) -> Option<TranslationRequest> {
        let session = self.session.as_ref()?;
        let language = session.display_language();
        if !language.needs_translation() {
            self.pending = None;
            self.displayed_text = Some(session.source_text().to_string());
            return None;
        }
        self.pending = Some((session.id(), language));
        self.displayed_text = None;
        Some(TranslationRequest::new(
            session.id(),
            language,
            session.source_text().to_string(),
        ))
    }

    fn record(&mut self, is_win: bool) {
        let key = self.round_generation.key();
        match self.scores.record_outcome(key, is_win) {
            Ok(record) => info!(key, wins = record.wins(), losses = record.losses(), "Outcome recorded"),
            Err(e) => warn!(error = %e, key, "Failed to persist outcome"),
        }
    }

    /// Current session, if a round was started.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Text currently shown for the round; `None` while a translation is
    /// outstanding or before the first round.
    pub fn displayed_text(&self) -> Option<&str> {
        self.displayed_text.as_deref()
    }

    /// Returns true while a translation for the current session is in flight.
    pub fn translation_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns true if guess and give-up intents should be offered.
    pub fn accepts_guesses(&self) -> bool {
        !self.translation_pending()
            && self
                .session
                .as_ref()
                .is_some_and(|session| !session.status().is_terminal())
    }

    /// Returns true if a restart should be offered: no round yet, the round
    /// is over, or another generation was selected since it started.
    pub fn can_restart(&self) -> bool {
        self.session.as_ref().is_none_or(|session| {
            session.status().is_terminal() || self.round_generation != self.generation
        })
    }

    /// Generation the next round is drawn from.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Generation the current round was drawn from; outcomes are scored
    /// under it.
    pub fn round_generation(&self) -> Generation {
        self.round_generation
    }

    /// Selected display language.
    pub fn language(&self) -> Language {
        self.settings.display_language
    }

    /// Names a guess may take: the current round's pool while it is in
    /// progress, otherwise the selected generation's.
    pub fn valid_names(&self) -> &ValidNameSet {
        match &self.session {
            Some(session) if !session.status().is_terminal() => session.valid_names(),
            _ => &self.valid_names,
        }
    }

    /// Score board.
    pub fn scores(&self) -> &ScoreBoard<S> {
        &self.scores
    }

    /// `"wins/total"` for the selected generation.
    pub fn success_rate(&self) -> String {
        self.scores.success_rate(self.generation.key())
    }

    /// Shared handle to the translator, for running tickets off-thread.
    pub fn translator(&self) -> Arc<dyn Translator> {
        Arc::clone(&self.translator)
    }
}
