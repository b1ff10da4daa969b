//! Game configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::game::DEFAULT_ATTEMPT_BUDGET;
use crate::species::{DEFAULT_SPECIES_API_URL, Generation};
use crate::translation::{DEFAULT_TRANSLATION_URL, Language};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dex_guesser.toml";

/// Settings for the game client.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GuesserConfig {
    /// Root of the PokeAPI-compatible species catalog.
    #[serde(default = "default_species_api_url")]
    species_api_url: String,

    /// Root of the translation service.
    #[serde(default = "default_translation_url")]
    translation_url: String,

    /// JSON file holding per-generation scores.
    #[serde(default = "default_score_file")]
    score_file: PathBuf,

    /// Wrong guesses allowed per round.
    #[serde(default = "default_attempt_budget")]
    attempt_budget: u8,

    /// Generation selected at startup.
    #[serde(default)]
    generation: Generation,

    /// Display language selected at startup.
    #[serde(default)]
    language: Language,
}

fn default_species_api_url() -> String {
    DEFAULT_SPECIES_API_URL.to_string()
}

fn default_translation_url() -> String {
    DEFAULT_TRANSLATION_URL.to_string()
}

fn default_score_file() -> PathBuf {
    PathBuf::from("dex_guesser_scores.json")
}

fn default_attempt_budget() -> u8 {
    DEFAULT_ATTEMPT_BUDGET
}

impl Default for GuesserConfig {
    fn default() -> Self {
        Self {
            species_api_url: default_species_api_url(),
            translation_url: default_translation_url(),
            score_file: default_score_file(),
            attempt_budget: default_attempt_budget(),
            generation: Generation::default(),
            language: Language::default(),
        }
    }
}

impl GuesserConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(generation = %config.generation, language = %config.language, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Replaces the startup generation.
    pub fn with_generation(mut self, generation: Generation) -> Self {
        self.generation = generation;
        self
    }

    /// Replaces the startup language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Replaces the translation service root.
    pub fn with_translation_url(mut self, url: String) -> Self {
        self.translation_url = url;
        self
    }

    /// Replaces the score file location.
    pub fn with_score_file(mut self, path: PathBuf) -> Self {
        self.score_file = path;
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
