//! Tests for intent gating in the terminal app.

use std::sync::Arc;

use async_trait::async_trait;
use dex_guesser::{
    App, DescriptionEntry, GatewayError, Generation, InMemoryScoreStore, Intent, Language,
    RosterEntry, RoundController, ScoreBoard, SessionSettings, SessionStatus, SpeciesDescriptor,
    SpeciesGateway, TranslationError, TranslationResponse, Translator,
};
use tokio::sync::mpsc;

/// Catalog with a single gen-I species.
struct OneSpecies;

#[async_trait]
impl SpeciesGateway for OneSpecies {
    async fn generation_roster(&self, generation: Generation) -> Result<Vec<RosterEntry>, GatewayError> {
        match generation {
            Generation::GenerationI => Ok(vec![RosterEntry::new(
                "pikachu".to_string(),
                "species/pikachu".to_string(),
            )]),
            _ => Ok(Vec::new()),
        }
    }

    async fn species_descriptor(&self, species: &str) -> Result<SpeciesDescriptor, GatewayError> {
        Ok(SpeciesDescriptor::new(
            species.to_string(),
            None,
            vec![DescriptionEntry::new("en".to_string(), "It stores electricity.".to_string())],
        ))
    }
}

struct Echo;

#[async_trait]
impl Translator for Echo {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        Ok(format!("[{}] {}", target_language, text))
    }
}

fn app(language: Language) -> (App<InMemoryScoreStore>, mpsc::UnboundedReceiver<TranslationResponse>) {
    let settings = SessionSettings {
        attempt_budget: 3,
        display_language: language,
    };
    let controller = RoundController::new(
        Arc::new(OneSpecies),
        Arc::new(Echo),
        ScoreBoard::load(InMemoryScoreStore::new()),
        settings,
        Generation::GenerationI,
    );
    let (tx, rx) = mpsc::unbounded_channel();
    (App::new(controller, tx), rx)
}

async fn type_text(app: &mut App<InMemoryScoreStore>, text: &str) {
    for c in text.chars() {
        app.handle(Intent::Type(c)).await;
    }
}

fn attempts(app: &App<InMemoryScoreStore>) -> Option<u8> {
    app.controller().session().map(|s| s.attempts_remaining())
}

fn status(app: &App<InMemoryScoreStore>) -> Option<SessionStatus> {
    app.controller().session().map(|s| s.status())
}

#[tokio::test]
async fn test_guess_and_give_up_ignored_while_translating() {
    let (mut app, mut rx) = app(Language::De);
    app.begin().await;
    assert!(app.controller().translation_pending());

    type_text(&mut app, "pikachu").await;
    assert_eq!(app.input(), "");
    app.handle(Intent::Guess).await;
    app.handle(Intent::GiveUp).await;
    assert_eq!(attempts(&app), Some(3));
    assert_eq!(status(&app), Some(SessionStatus::InProgress));

    let response = rx.recv().await.expect("Translation delivered");
    app.on_translation(response);
    assert_eq!(app.controller().displayed_text(), Some("[de] It stores electricity."));

    type_text(&mut app, "pikachu").await;
    assert_eq!(app.input(), "pikachu");
    app.handle(Intent::Guess).await;
    assert_eq!(status(&app), Some(SessionStatus::Won));
    assert_eq!(app.status_message(), "Correct! The Pokémon is pikachu.");
}

#[tokio::test]
async fn test_restart_only_on_terminal_round() {
    let (mut app, _rx) = app(Language::En);
    app.begin().await;
    let first = app.controller().session().map(|s| s.id()).expect("Round started");

    app.handle(Intent::Restart).await;
    assert_eq!(app.controller().session().map(|s| s.id()), Some(first));

    app.handle(Intent::GiveUp).await;
    assert_eq!(status(&app), Some(SessionStatus::ConcededLost));
    assert!(app.revealed());

    app.handle(Intent::Restart).await;
    let second = app.controller().session().map(|s| s.id()).expect("Round restarted");
    assert_ne!(second, first);
    assert_eq!(status(&app), Some(SessionStatus::InProgress));
}

#[tokio::test]
async fn test_terminal_round_ignores_guess_and_give_up() {
    let (mut app, _rx) = app(Language::En);
    app.begin().await;

    app.handle(Intent::GiveUp).await;
    assert_eq!(app.controller().success_rate(), "0/1");

    type_text(&mut app, "pikachu").await;
    assert_eq!(app.input(), "");
    app.handle(Intent::Guess).await;
    app.handle(Intent::GiveUp).await;

    assert_eq!(status(&app), Some(SessionStatus::ConcededLost));
    assert_eq!(app.controller().success_rate(), "0/1");
}

#[tokio::test]
async fn test_empty_input_is_not_guessed() {
    let (mut app, _rx) = app(Language::En);
    app.begin().await;

    type_text(&mut app, "  ").await;
    app.handle(Intent::Guess).await;
    assert_eq!(attempts(&app), Some(3));

    app.handle(Intent::Quit).await;
    assert!(app.should_quit());
}
