//! Tests for loading the game configuration.

use std::path::PathBuf;

use dex_guesser::{
    DEFAULT_ATTEMPT_BUDGET, DEFAULT_SPECIES_API_URL, DEFAULT_TRANSLATION_URL, Generation,
    GuesserConfig, Language,
};

#[test]
fn test_defaults() {
    let config = GuesserConfig::default();
    assert_eq!(config.species_api_url(), DEFAULT_SPECIES_API_URL);
    assert_eq!(config.translation_url(), DEFAULT_TRANSLATION_URL);
    assert_eq!(*config.attempt_budget(), DEFAULT_ATTEMPT_BUDGET);
    assert_eq!(*config.generation(), Generation::GenerationI);
    assert_eq!(*config.language(), Language::Es);
}

#[test]
fn test_from_file_fills_missing_keys() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let path = dir.path().join("dex_guesser.toml");
    std::fs::write(
        &path,
        r#"
generation = "generation-iv"
language = "ja"
attempt_budget = 5
"#,
    )
    .expect("Write config");

    let config = GuesserConfig::from_file(&path).expect("Valid config");
    assert_eq!(*config.generation(), Generation::GenerationIv);
    assert_eq!(*config.language(), Language::Ja);
    assert_eq!(*config.attempt_budget(), 5);
    assert_eq!(config.species_api_url(), DEFAULT_SPECIES_API_URL);
}

#[test]
fn test_from_file_rejects_unknown_generation() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let path = dir.path().join("dex_guesser.toml");
    std::fs::write(&path, "generation = \"generation-ix\"\n").expect("Write config");

    let err = GuesserConfig::from_file(&path).expect_err("Unknown generation");
    assert!(err.message.contains("Failed to parse config"));
}

#[test]
fn test_load_or_default_without_file() {
    let dir = tempfile::tempdir().expect("Temp dir");
    let config = GuesserConfig::load_or_default(dir.path().join("absent.toml")).expect("Defaults");
    assert_eq!(config, GuesserConfig::default());
}

#[test]
fn test_overrides() {
    let config = GuesserConfig::default()
        .with_generation(Generation::GenerationVi)
        .with_language(Language::Fr)
        .with_translation_url("http://translate.local".to_string())
        .with_score_file(PathBuf::from("scores/dex.json"));

    assert_eq!(*config.generation(), Generation::GenerationVi);
    assert_eq!(*config.language(), Language::Fr);
    assert_eq!(config.translation_url(), "http://translate.local");
    assert_eq!(config.score_file(), &PathBuf::from("scores/dex.json"));
}
