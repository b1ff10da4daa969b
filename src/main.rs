//! Dex Guesser - unified CLI
//!
//! Terminal game client, translation service and score report.

#![warn(missing_docs)]

mod cli;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use dex_guesser::{
    Generation, GuesserConfig, JsonFileScoreStore, Language, LibreTranslateClient, ScoreBoard,
    TranslationService, run_tui, server,
};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            generation,
            language,
            translation_url,
            score_file,
        } => {
            let config = load_config(&config, generation, language, translation_url, score_file)?;
            run_tui(config).await
        }
        Command::Serve { port, host } => run_translation_service(host, port).await,
        Command::Stats { config, score_file } => {
            let config = load_config(&config, None, None, None, score_file)?;
            print_stats(&config);
            Ok(())
        }
    }
}

/// Loads the config file and applies command-line overrides.
fn load_config(
    path: &Path,
    generation: Option<Generation>,
    language: Option<Language>,
    translation_url: Option<String>,
    score_file: Option<PathBuf>,
) -> Result<GuesserConfig> {
    let mut config = GuesserConfig::load_or_default(path)?;
    if let Some(generation) = generation {
        config = config.with_generation(generation);
    }
    if let Some(language) = language {
        config = config.with_language(language);
    }
    if let Some(url) = translation_url {
        config = config.with_translation_url(url);
    }
    if let Some(path) = score_file {
        config = config.with_score_file(path);
    }
    Ok(config)
}

/// Run the translation service
#[instrument]
async fn run_translation_service(host: String, port: u16) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting translation service");
    let upstream = Arc::new(LibreTranslateClient::from_env());
    let service = Arc::new(TranslationService::new(upstream));
    server::serve(&host, port, service).await
}

/// Print the score table
fn print_stats(config: &GuesserConfig) {
    let board = ScoreBoard::load(JsonFileScoreStore::new(config.score_file()));

    if board.summary().next().is_none() {
        println!("No rounds recorded yet.");
        return;
    }

    println!("{:<12} {:>6} {:>8} {:>10}", "Generation", "Wins", "Losses", "Success");
    for (key, record) in board.summary() {
        let label = Generation::iter()
            .find(|generation| generation.key() == key)
            .map_or(key, |generation| generation.label());
        println!(
            "{:<12} {:>6} {:>8} {:>10}",
            label,
            record.wins(),
            record.losses(),
            board.success_rate(key)
        );
    }
}
