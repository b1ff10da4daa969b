//! Tests for round orchestration with in-process catalog and translator.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use dex_guesser::{
    DescriptionEntry, GatewayError, Generation, GuessOutcome, InMemoryScoreStore, Language,
    MAX_REROLLS, RosterEntry, RoundController, RoundError, ScoreBoard, ScoreRecord, ScoreStore,
    SessionError, SessionSettings, SessionStatus, SpeciesDescriptor, SpeciesGateway,
    TRANSLATION_FALLBACK, TranslationError, Translator,
};

/// Catalog serving fixed rosters and descriptors.
#[derive(Default)]
struct FakeCatalog {
    rosters: HashMap<Generation, Vec<RosterEntry>>,
    descriptors: HashMap<String, SpeciesDescriptor>,
    offline: bool,
    descriptor_calls: AtomicUsize,
}

impl FakeCatalog {
    fn with_species(mut self, generation: Generation, name: &str, english: Option<&str>) -> Self {
        self.rosters
            .entry(generation)
            .or_default()
            .push(RosterEntry::new(name.to_string(), format!("species/{}", name)));
        let mut entries = vec![DescriptionEntry::new("fr".to_string(), "Une créature.".to_string())];
        if let Some(text) = english {
            entries.push(DescriptionEntry::new("en".to_string(), text.to_string()));
        }
        self.descriptors
            .insert(name.to_string(), SpeciesDescriptor::new(name.to_string(), None, entries));
        self
    }

    fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl SpeciesGateway for FakeCatalog {
    async fn generation_roster(&self, generation: Generation) -> Result<Vec<RosterEntry>, GatewayError> {
        if self.offline {
            return Err(GatewayError::new("connection refused"));
        }
        Ok(self.rosters.get(&generation).cloned().unwrap_or_default())
    }

    async fn species_descriptor(&self, species: &str) -> Result<SpeciesDescriptor, GatewayError> {
        self.descriptor_calls.fetch_add(1, Ordering::SeqCst);
        self.descriptors
            .get(species)
            .cloned()
            .ok_or_else(|| GatewayError::new(format!("unknown species {}", species)))
    }
}

/// Translator that tags text with the target language.
#[derive(Default)]
struct TaggingTranslator {
    failing: bool,
    calls: AtomicUsize,
}

#[async_trait]
impl Translator for TaggingTranslator {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(TranslationError::new("upstream down"));
        }
        Ok(format!("[{}] {}", target_language, text))
    }
}

fn single_species_catalog() -> FakeCatalog {
    FakeCatalog::default().with_species(Generation::GenerationI, "pikachu", Some("It stores electricity."))
}

fn controller(
    catalog: FakeCatalog,
    translator: Arc<TaggingTranslator>,
    store: InMemoryScoreStore,
    language: Language,
) -> RoundController<InMemoryScoreStore> {
    let settings = SessionSettings {
        attempt_budget: 3,
        display_language: language,
    };
    RoundController::new(
        Arc::new(catalog),
        translator,
        ScoreBoard::load(store),
        settings,
        Generation::GenerationI,
    )
    .with_seed(42)
}

#[tokio::test]
async fn test_guess_before_round_is_not_started() {
    let mut round = controller(
        single_species_catalog(),
        Arc::new(TaggingTranslator::default()),
        InMemoryScoreStore::new(),
        Language::En,
    );
    let result = round.submit_guess("pikachu");
    assert!(matches!(result, Err(RoundError::Session(SessionError::SessionNotStarted))));
    assert!(matches!(
        round.concede(),
        Err(RoundError::Session(SessionError::SessionNotStarted))
    ));
    assert!(round.can_restart());
    assert!(!round.accepts_guesses());
}

#[tokio::test]
async fn test_english_round_needs_no_translation() {
    let translator = Arc::new(TaggingTranslator::default());
    let mut round = controller(
        single_species_catalog(),
        Arc::clone(&translator),
        InMemoryScoreStore::new(),
        Language::En,
    );

    let request = round.start_round().await.expect("Round starts");
    assert!(request.is_none());
    assert_eq!(round.displayed_text(), Some("It stores electricity."));
    assert!(round.accepts_guesses());
    assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_translation_applied_to_current_session() {
    let translator = Arc::new(TaggingTranslator::default());
    let mut round = controller(
        single_species_catalog(),
        Arc::clone(&translator),
        InMemoryScoreStore::new(),
        Language::De,
    );

    let request = round
        .start_round()
        .await
        .expect("Round starts")
        .expect("German needs a translation");
    assert!(round.translation_pending());
    assert!(!round.accepts_guesses());
    assert_eq!(round.displayed_text(), None);

    assert!(round.complete_translation(request).await);
    assert_eq!(round.displayed_text(), Some("[de] It stores electricity."));
    assert!(round.accepts_guesses());
}

#[tokio::test]
async fn test_stale_translation_is_discarded_after_restart() {
    let translator = Arc::new(TaggingTranslator::default());
    let mut round = controller(
        single_species_catalog(),
        Arc::clone(&translator),
        InMemoryScoreStore::new(),
        Language::Es,
    );

    let first = round.start_round().await.expect("Round starts").expect("Ticket");
    let stale = first.fulfil(translator.as_ref()).await;

    round.concede().expect("Round in progress");
    let second = round.restart().await.expect("Round restarts").expect("Ticket");
    assert_ne!(second.session_id(), stale.session_id());

    assert!(!round.apply_translation(stale));
    assert_eq!(round.displayed_text(), None);
    assert!(round.translation_pending());

    assert!(round.complete_translation(second).await);
    assert_eq!(round.displayed_text(), Some("[es] It stores electricity."));
}

#[tokio::test]
async fn test_language_change_refetches_and_drops_old_language() {
    let translator = Arc::new(TaggingTranslator::default());
    let mut round = controller(
        single_species_catalog(),
        Arc::clone(&translator),
        InMemoryScoreStore::new(),
        Language::Es,
    );

    let spanish = round.start_round().await.expect("Round starts").expect("Ticket");
    let italian = round.change_language(Language::It).expect("Italian needs a translation");
    assert_eq!(round.session().map(|s| s.display_language()), Some(Language::It));

    let late = spanish.fulfil(translator.as_ref()).await;
    assert!(!round.apply_translation(late));
    assert!(round.complete_translation(italian).await);
    assert_eq!(round.displayed_text(), Some("[it] It stores electricity."));

    // Re-selecting the same language still fetches again.
    assert!(round.change_language(Language::It).is_some());

    // Switching back to the source language shows the text directly.
    assert!(round.change_language(Language::En).is_none());
    assert_eq!(round.displayed_text(), Some("It stores electricity."));
    assert!(!round.translation_pending());
}

#[tokio::test]
async fn test_failed_translation_shows_fallback() {
    let translator = Arc::new(TaggingTranslator {
        failing: true,
        ..TaggingTranslator::default()
    });
    let mut round = controller(
        single_species_catalog(),
        Arc::clone(&translator),
        InMemoryScoreStore::new(),
        Language::Fr,
    );

    let request = round.start_round().await.expect("Round starts").expect("Ticket");
    assert!(round.complete_translation(request).await);
    assert_eq!(round.displayed_text(), Some(TRANSLATION_FALLBACK));
    assert!(round.accepts_guesses());
}

#[tokio::test]
async fn test_win_is_recorded_once() {
    let store = InMemoryScoreStore::new();
    let mut round = controller(
        single_species_catalog(),
        Arc::new(TaggingTranslator::default()),
        store.clone(),
        Language::En,
    );
    round.start_round().await.expect("Round starts");

    assert_eq!(round.submit_guess("Pikachu").expect("Known name"), GuessOutcome::Correct);
    assert!(round.submit_guess("pikachu").is_err());
    assert!(round.concede().is_err());

    assert_eq!(round.success_rate(), "1/1");
    let stored = store.load().expect("In-memory load");
    assert_eq!(stored.get("generation-i"), Some(&ScoreRecord::new(1, 0)));
}

#[tokio::test]
async fn test_loss_and_concession_are_recorded() {
    let catalog = FakeCatalog::default()
        .with_species(Generation::GenerationI, "pikachu", Some("It stores electricity."))
        .with_species(Generation::GenerationI, "eevee", Some("Its genes are unstable."))
        .with_species(Generation::GenerationI, "bulbasaur", Some("A seed grows on its back."))
        .with_species(Generation::GenerationI, "vaporeon", Some("It melts into water."));
    let store = InMemoryScoreStore::new();
    let mut round = controller(catalog, Arc::new(TaggingTranslator::default()), store.clone(), Language::En);

    round.start_round().await.expect("Round starts");
    let target = round.session().map(|s| s.target_name().to_string()).expect("Session");
    let wrong: Vec<&str> = ["pikachu", "eevee", "bulbasaur", "vaporeon"]
        .into_iter()
        .filter(|name| *name != target)
        .collect();
    for (i, guess) in wrong.iter().enumerate() {
        let outcome = round.submit_guess(guess).expect("Known name");
        if i < 2 {
            assert_eq!(outcome, GuessOutcome::Incorrect);
        } else {
            assert_eq!(outcome, GuessOutcome::OutOfAttempts);
        }
    }
    assert_eq!(round.session().map(|s| s.status()), Some(SessionStatus::Lost));
    assert!(round.can_restart());

    round.restart().await.expect("Round restarts");
    round.concede().expect("Round in progress");

    assert_eq!(round.scores().record("generation-i"), ScoreRecord::new(0, 2));
    assert_eq!(round.success_rate(), "0/2");
}

#[tokio::test]
async fn test_invalid_guess_is_not_scored() {
    let store = InMemoryScoreStore::new();
    let mut round = controller(
        single_species_catalog(),
        Arc::new(TaggingTranslator::default()),
        store.clone(),
        Language::En,
    );
    round.start_round().await.expect("Round starts");

    let result = round.submit_guess("agumon");
    assert!(matches!(result, Err(RoundError::Session(SessionError::InvalidGuess(_)))));
    assert_eq!(round.session().map(|s| s.attempts_remaining()), Some(3));
    assert!(store.load().expect("In-memory load").is_empty());
}

#[tokio::test]
async fn test_species_without_description_is_rerolled() {
    let catalog = FakeCatalog::default()
        .with_species(Generation::GenerationI, "missingno", None)
        .with_species(Generation::GenerationI, "pikachu", Some("It stores electricity."));
    let mut round = controller(catalog, Arc::new(TaggingTranslator::default()), InMemoryScoreStore::new(), Language::En);

    // A seeded draw may land on either species, so allow several rounds.
    for _ in 0..5 {
        match round.start_round().await {
            Ok(_) => {
                assert_eq!(round.session().map(|s| s.target_name()), Some("pikachu"));
                return;
            }
            Err(RoundError::Session(SessionError::NoDescriptorAvailable)) => continue,
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }
    panic!("Never drew the species with a description");
}

#[tokio::test]
async fn test_reroll_gives_up_after_limit() {
    let catalog = FakeCatalog::default().with_species(Generation::GenerationI, "missingno", None);
    let mut round = controller(catalog, Arc::new(TaggingTranslator::default()), InMemoryScoreStore::new(), Language::En);

    let result = round.start_round().await;
    assert!(matches!(
        result,
        Err(RoundError::Session(SessionError::NoDescriptorAvailable))
    ));
    assert!(round.session().is_none());
}

#[tokio::test]
async fn test_reroll_draws_at_most_limit_descriptors() {
    let catalog = Arc::new(FakeCatalog::default().with_species(Generation::GenerationI, "missingno", None));
    let mut round = RoundController::new(
        Arc::clone(&catalog) as Arc<dyn SpeciesGateway>,
        Arc::new(TaggingTranslator::default()),
        ScoreBoard::load(InMemoryScoreStore::new()),
        SessionSettings::default(),
        Generation::GenerationI,
    );

    assert!(round.start_round().await.is_err());
    assert_eq!(catalog.descriptor_calls.load(Ordering::SeqCst), MAX_REROLLS);
}

#[tokio::test]
async fn test_offline_catalog_starts_no_round() {
    let mut round = controller(
        FakeCatalog::offline(),
        Arc::new(TaggingTranslator::default()),
        InMemoryScoreStore::new(),
        Language::En,
    );

    assert!(matches!(round.start_round().await, Err(RoundError::Gateway(_))));
    assert!(round.session().is_none());
    assert!(round.can_restart());
}

#[tokio::test]
async fn test_select_generation_rebuilds_pool() {
    let catalog = single_species_catalog()
        .with_species(Generation::GenerationIi, "chikorita", Some("It waves its leaf."));
    let mut round = controller(catalog, Arc::new(TaggingTranslator::default()), InMemoryScoreStore::new(), Language::En);

    round.select_generation(Generation::GenerationIi).await.expect("Roster available");
    assert_eq!(round.generation(), Generation::GenerationIi);
    assert!(round.valid_names().contains("chikorita"));
    assert!(!round.valid_names().contains("pikachu"));

    round.start_round().await.expect("Round starts");
    assert_eq!(round.session().map(|s| s.target_name()), Some("chikorita"));
    round.submit_guess("chikorita").expect("Known name");
    assert_eq!(round.scores().success_rate("generation-ii"), "1/1");
    assert_eq!(round.scores().success_rate("generation-i"), "0/0");
}

#[tokio::test]
async fn test_empty_generation_keeps_previous_selection() {
    let mut round = controller(
        single_species_catalog(),
        Arc::new(TaggingTranslator::default()),
        InMemoryScoreStore::new(),
        Language::En,
    );
    round.select_generation(Generation::GenerationI).await.expect("Roster available");

    let result = round.select_generation(Generation::GenerationVii).await;
    assert!(matches!(result, Err(RoundError::Gateway(_))));
    assert_eq!(round.generation(), Generation::GenerationI);
    assert!(round.valid_names().contains("pikachu"));
}

#[tokio::test]
async fn test_generation_switch_mid_round_scores_under_round_generation() {
    let catalog = single_species_catalog()
        .with_species(Generation::GenerationIi, "chikorita", Some("It waves its leaf."));
    let store = InMemoryScoreStore::new();
    let mut round = controller(catalog, Arc::new(TaggingTranslator::default()), store.clone(), Language::En);

    round.start_round().await.expect("Round starts");
    assert!(!round.can_restart());

    round.select_generation(Generation::GenerationIi).await.expect("Roster available");
    assert_eq!(round.generation(), Generation::GenerationIi);
    assert_eq!(round.round_generation(), Generation::GenerationI);

    // The running round keeps guessing against its own pool.
    assert!(round.valid_names().suggestions("chi", 5).is_empty());
    assert_eq!(round.valid_names().suggestions("pi", 5), vec!["pikachu"]);
    assert!(matches!(
        round.submit_guess("chikorita"),
        Err(RoundError::Session(SessionError::InvalidGuess(_)))
    ));

    // A pending switch makes the round restartable.
    assert!(round.can_restart());

    round.concede().expect("Round in progress");
    assert_eq!(round.scores().success_rate("generation-i"), "0/1");
    assert_eq!(round.scores().success_rate("generation-ii"), "0/0");

    round.restart().await.expect("Round restarts");
    assert_eq!(round.round_generation(), Generation::GenerationIi);
    assert_eq!(round.session().map(|s| s.target_name()), Some("chikorita"));
    round.submit_guess("chikorita").expect("Known name");
    assert_eq!(round.scores().success_rate("generation-ii"), "1/1");
    assert_eq!(
        store.load().expect("In-memory load").get("generation-i"),
        Some(&ScoreRecord::new(0, 1))
    );
}
