//! Dex Guesser library - a creature guessing game over translated catalog entries
//!
//! A round picks a random species from the selected generation, shows one
//! of its catalog descriptions translated into the player's language, and
//! gives the player a fixed number of wrong guesses to name it.
//!
//! # Architecture
//!
//! - **Game**: Immutable [`GameSession`] state machine with contract checks
//! - **Species**: Catalog gateway, roster and valid-name pool
//! - **Translation**: Translator seam, HTTP clients and the caching service
//! - **Scores**: Per-generation win/loss records behind a [`ScoreStore`]
//! - **Round**: [`RoundController`] tying the above together for one player
//! - **TUI**: Terminal front end
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use dex_guesser::{
//!     Generation, HttpTranslator, InMemoryScoreStore, PokeApiGateway, RoundController,
//!     ScoreBoard, SessionSettings,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut controller = RoundController::new(
//!     Arc::new(PokeApiGateway::new("https://pokeapi.co/api/v2")),
//!     Arc::new(HttpTranslator::new("http://127.0.0.1:5000")),
//!     ScoreBoard::load(InMemoryScoreStore::new()),
//!     SessionSettings::default(),
//!     Generation::GenerationI,
//! );
//! if let Some(request) = controller.start_round().await? {
//!     controller.complete_translation(request).await;
//! }
//! let outcome = controller.submit_guess("pikachu")?;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod game;
mod round;
mod scores;
mod species;
mod translation;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, GuesserConfig};

// Crate-level exports - Game session
pub use game::{
    Contract, DEFAULT_ATTEMPT_BUDGET, GameSession, GuessContract, GuessIsKnown, GuessOutcome,
    SessionError, SessionId, SessionInProgress, SessionSettings, SessionStatus, ValidNameSet,
    canonical_name,
};

// Crate-level exports - Round orchestration
pub use round::{MAX_REROLLS, RoundController, RoundError};

// Crate-level exports - Scores
pub use scores::{
    InMemoryScoreStore, JsonFileScoreStore, ScoreBoard, ScoreError, ScoreMap, ScoreRecord,
    ScoreStore,
};

// Crate-level exports - Species catalog
pub use species::{
    DEFAULT_SPECIES_API_URL, DescriptionEntry, GatewayError, Generation, PokeApiGateway,
    RosterEntry, SpeciesDescriptor, SpeciesGateway, build_valid_names, collapse_whitespace,
    select_source_text,
};

// Crate-level exports - Translation
pub use translation::{
    DEFAULT_LIBRETRANSLATE_URL, DEFAULT_TRANSLATION_URL, ErrorReply, HttpTranslator, Language,
    LibreTranslateClient, TRANSLATION_FALLBACK, TranslateBody, TranslateReply, TranslationError,
    TranslationRequest, TranslationResponse, TranslationService, Translator, server,
};

// Crate-level exports - Terminal UI
pub use tui::{App, Intent, SUGGESTION_LIMIT, intent_for, run_tui};
