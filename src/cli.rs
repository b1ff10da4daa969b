//! Command-line interface for dex_guesser.

use clap::{Parser, Subcommand};

use dex_guesser::{DEFAULT_CONFIG_FILE, Generation, Language};

/// Dex Guesser - guess the creature from its translated catalog entry
#[derive(Parser, Debug)]
#[command(name = "dex_guesser")]
#[command(about = "Guess the creature from its translated catalog entry", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal
    Play {
        /// Path to the TOML config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: std::path::PathBuf,

        /// Generation to start with (e.g. generation-iv)
        #[arg(short, long)]
        generation: Option<Generation>,

        /// Display language (en, es, de, it, fr, ja)
        #[arg(short, long)]
        language: Option<Language>,

        /// Translation service URL
        #[arg(long)]
        translation_url: Option<String>,

        /// Score file location
        #[arg(long)]
        score_file: Option<std::path::PathBuf>,
    },

    /// Run the caching translation service
    Serve {
        /// Port to bind to
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Print per-generation win/loss records
    Stats {
        /// Path to the TOML config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: std::path::PathBuf,

        /// Score file location
        #[arg(long)]
        score_file: Option<std::path::PathBuf>,
    },
}
