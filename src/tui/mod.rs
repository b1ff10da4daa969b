//! Terminal UI for the guessing game.

mod app;
mod input;
mod ui;

use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tracing::{error, info, instrument};

pub use app::{App, SUGGESTION_LIMIT};
pub use input::{Intent, intent_for};

use crate::config::GuesserConfig;
use crate::game::SessionSettings;
use crate::round::RoundController;
use crate::scores::{JsonFileScoreStore, ScoreBoard, ScoreStore};
use crate::species::PokeApiGateway;
use crate::translation::{HttpTranslator, TranslationResponse};

type CrosstermTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Runs the game until the player quits.
pub async fn run_tui(config: GuesserConfig) -> Result<()> {
    // Log to a file so tracing output doesn't tear the screen.
    let log_file = std::fs::File::create("dex_guesser.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?config, "Starting Dex Guesser TUI");

    let gateway = Arc::new(PokeApiGateway::new(config.species_api_url()));
    let translator = Arc::new(HttpTranslator::new(config.translation_url()));
    let scores = ScoreBoard::load(JsonFileScoreStore::new(config.score_file()));
    let settings = SessionSettings {
        attempt_budget: *config.attempt_budget(),
        display_language: *config.language(),
    };
    let controller = RoundController::new(gateway, translator, scores, settings, *config.generation());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(controller, tx);

    let res = run_app(&mut terminal, &mut app, &mut rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_app<S: ScoreStore>(
    terminal: &mut CrosstermTerminal,
    app: &mut App<S>,
    translations: &mut mpsc::UnboundedReceiver<TranslationResponse>,
) -> Result<()> {
    terminal.draw(|f| ui::draw(f, app))?;
    app.begin().await;

    loop {
        while let Ok(response) = translations.try_recv() {
            app.on_translation(response);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            // Skip key release events (crossterm fires both press and release).
            if key.kind == KeyEventKind::Release {
                continue;
            }
            app.handle(intent_for(key)).await;
            if app.should_quit() {
                return Ok(());
            }
        }
    }
}
