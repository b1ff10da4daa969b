//! Application state and intent handling.

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::input::Intent;
use crate::game::{GuessOutcome, SessionStatus};
use crate::round::{RoundController, RoundError};
use crate::scores::ScoreStore;
use crate::translation::{TranslationRequest, TranslationResponse};

/// Suggestions shown under the guess input.
pub const SUGGESTION_LIMIT: usize = 5;

/// Main application state.
pub struct App<S> {
    controller: RoundController<S>,
    input: String,
    status_message: String,
    translations: mpsc::UnboundedSender<TranslationResponse>,
    should_quit: bool,
}

impl<S: ScoreStore> App<S> {
    /// Creates the app around a controller; completed translations are sent
    /// to `translations`.
    pub fn new(controller: RoundController<S>, translations: mpsc::UnboundedSender<TranslationResponse>) -> Self {
        Self {
            controller,
            input: String::new(),
            status_message: "Loading...".to_string(),
            translations,
            should_quit: false,
        }
    }

    /// Round controller.
    pub fn controller(&self) -> &RoundController<S> {
        &self.controller
    }

    /// Current guess input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Message line.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Returns true once the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Names matching the current input.
    pub fn suggestions(&self) -> Vec<&str> {
        self.controller.valid_names().suggestions(&self.input, SUGGESTION_LIMIT)
    }

    /// Starts the first round of the configured generation.
    #[instrument(skip(self))]
    pub async fn begin(&mut self) {
        let generation = self.controller.generation();
        match self.controller.select_generation(generation).await {
            Ok(()) => self.new_round().await,
            Err(e) => self.report(e),
        }
    }

    /// Handles one intent.
    #[instrument(skip(self))]
    pub async fn handle(&mut self, intent: Intent) {
        match intent {
            Intent::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
            Intent::Type(c) if self.controller.accepts_guesses() => self.input.push(c),
            Intent::Backspace => {
                self.input.pop();
            }
            Intent::Complete => {
                let completion = self.suggestions().first().map(|name| name.to_string());
                if let Some(name) = completion {
                    self.input = name;
                }
            }
            Intent::Guess if self.controller.accepts_guesses() && !self.input.trim().is_empty() => {
                self.guess();
            }
            Intent::GiveUp if self.controller.accepts_guesses() => self.give_up(),
            Intent::Restart if self.controller.can_restart() => self.new_round().await,
            Intent::CycleLanguage => {
                let language = self.controller.language().cycle();
                let request = self.controller.change_language(language);
                self.dispatch(request);
            }
            Intent::CycleGeneration => {
                let generation = self.controller.generation().cycle();
                match self.controller.select_generation(generation).await {
                    Ok(()) => self.new_round().await,
                    Err(e) => self.report(e),
                }
            }
            _ => debug!("Intent not available right now"),
        }
    }

    /// Applies a translation that finished in the background.
    #[instrument(skip(self, response))]
    pub fn on_translation(&mut self, response: TranslationResponse) {
        if !self.controller.apply_translation(response) {
            debug!("Ignored stale translation");
        }
    }

    fn guess(&mut self) {
        let raw = std::mem::take(&mut self.input);
        match self.controller.submit_guess(&raw) {
            Ok(outcome) => {
                let answer = self.answer_name();
                self.status_message = match outcome {
                    GuessOutcome::Correct => format!("Correct! The Pokémon is {}.", answer),
                    GuessOutcome::Incorrect => "Incorrect. Try again.".to_string(),
                    GuessOutcome::Repeated => format!("You already guessed {}.", raw.trim()),
                    GuessOutcome::OutOfAttempts => format!("No more guesses! The Pokémon was {}.", answer),
                };
            }
            Err(e) => self.report(e),
        }
    }

    fn give_up(&mut self) {
        match self.controller.concede() {
            Ok(()) => {
                self.status_message = format!("You gave up! The Pokémon was {}.", self.answer_name());
            }
            Err(e) => self.report(e),
        }
    }

    async fn new_round(&mut self) {
        self.input.clear();
        self.status_message = "Fetching a new Pokémon...".to_string();
        match self.controller.restart().await {
            Ok(request) => {
                self.status_message = String::new();
                self.dispatch(request);
            }
            Err(e) => self.report(e),
        }
    }

    fn dispatch(&self, request: Option<TranslationRequest>) {
        let Some(request) = request else {
            return;
        };
        let translator = self.controller.translator();
        let tx = self.translations.clone();
        tokio::spawn(async move {
            let response = request.fulfil(translator.as_ref()).await;
            if tx.send(response).is_err() {
                debug!("UI closed before translation arrived");
            }
        });
    }

    fn answer_name(&self) -> String {
        self.controller
            .session()
            .map(|s| s.target().name().clone())
            .unwrap_or_default()
    }

    fn report(&mut self, error: RoundError) {
        warn!(error = %error, "Intent failed");
        self.status_message = match error {
            RoundError::Gateway(_) => "Could not reach the Pokédex. Press Ctrl+R to try again.".to_string(),
            RoundError::Session(e) => e.to_string(),
        };
    }

    /// Returns true if the round ended and the answer may be revealed.
    pub fn revealed(&self) -> bool {
        self.controller
            .session()
            .is_some_and(|s| s.status() != SessionStatus::InProgress)
    }
}
