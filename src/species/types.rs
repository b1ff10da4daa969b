//! Species catalog domain types.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tracing::instrument;

use crate::game::canonical_name;

/// A partition of the species catalog the player can pick from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Generation {
    /// Kanto.
    #[default]
    #[serde(rename = "generation-i")]
    #[strum(serialize = "generation-i")]
    GenerationI,
    /// Johto.
    #[serde(rename = "generation-ii")]
    #[strum(serialize = "generation-ii")]
    GenerationIi,
    /// Hoenn.
    #[serde(rename = "generation-iii")]
    #[strum(serialize = "generation-iii")]
    GenerationIii,
    /// Sinnoh.
    #[serde(rename = "generation-iv")]
    #[strum(serialize = "generation-iv")]
    GenerationIv,
    /// Unova.
    #[serde(rename = "generation-v")]
    #[strum(serialize = "generation-v")]
    GenerationV,
    /// Kalos.
    #[serde(rename = "generation-vi")]
    #[strum(serialize = "generation-vi")]
    GenerationVi,
    /// Alola.
    #[serde(rename = "generation-vii")]
    #[strum(serialize = "generation-vii")]
    GenerationVii,
    /// Galar.
    #[serde(rename = "generation-viii")]
    #[strum(serialize = "generation-viii")]
    GenerationViii,
}

impl Generation {
    /// Numeric catalog id (1..=8).
    pub fn id(self) -> u8 {
        self as u8 + 1
    }

    /// Key used by the catalog and the score record, e.g. `generation-iv`.
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Short display label, e.g. `Gen IV`.
    pub fn label(self) -> &'static str {
        match self {
            Self::GenerationI => "Gen I",
            Self::GenerationIi => "Gen II",
            Self::GenerationIii => "Gen III",
            Self::GenerationIv => "Gen IV",
            Self::GenerationV => "Gen V",
            Self::GenerationVi => "Gen VI",
            Self::GenerationVii => "Gen VII",
            Self::GenerationViii => "Gen VIII",
        }
    }

    /// Returns the next generation, wrapping around after the last.
    #[instrument]
    pub fn cycle(self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let index = all.iter().position(|g| *g == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

/// One catalog description in a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct DescriptionEntry {
    language_code: String,
    text: String,
}

/// Everything the round needs to know about its answer.
///
/// Immutable once fetched; a session holds it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct SpeciesDescriptor {
    /// Catalog name, possibly carrying a gender suffix.
    name: String,
    /// Image reference, opaque to the game.
    sprite_url: Option<String>,
    /// Descriptions in catalog order; language codes repeat.
    description_entries: Vec<DescriptionEntry>,
}

impl SpeciesDescriptor {
    /// Name with gender suffix stripped and case folded.
    pub fn canonical_name(&self) -> String {
        canonical_name(&self.name)
    }

    /// Entries written in `language_code`, in catalog order.
    pub fn entries_in<'a>(&'a self, language_code: &'a str) -> impl Iterator<Item = &'a DescriptionEntry> + 'a {
        self.description_entries
            .iter()
            .filter(move |entry| entry.language_code == language_code)
    }
}

/// One species listed in a generation roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct RosterEntry {
    name: String,
    species_url: String,
}
