//! Choosing which description text a round displays.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

use super::SpeciesDescriptor;

/// Collapses every whitespace run (including catalog form feeds) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Picks the source text for a round.
///
/// Keeps entries in `source_language`, prefers those that do not spell out
/// the species name (case-insensitive), falls back to every source-language
/// entry if all of them do, and picks one uniformly at random. Returns `None`
/// when the descriptor has no entry in `source_language`.
#[instrument(skip(descriptor, rng), fields(species = %descriptor.name()))]
pub fn select_source_text<R: Rng + ?Sized>(
    descriptor: &SpeciesDescriptor,
    source_language: &str,
    rng: &mut R,
) -> Option<String> {
    let name = descriptor.canonical_name();
    let candidates: Vec<&str> = descriptor
        .entries_in(source_language)
        .map(|entry| entry.text().as_str())
        .collect();

    let concealing: Vec<&str> = candidates
        .iter()
        .copied()
        .filter(|text| !text.to_lowercase().contains(&name))
        .collect();

    debug!(
        total = candidates.len(),
        concealing = concealing.len(),
        "Filtered description entries"
    );

    let pool = if concealing.is_empty() { &candidates } else { &concealing };
    pool.choose(rng).map(|text| collapse_whitespace(text))
}
