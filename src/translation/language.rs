//! Display languages offered to the player.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tracing::instrument;

/// Language the round's description is shown in.
///
/// Catalog descriptions are read in [`Language::SOURCE`]; every other
/// language goes through the translation service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    /// English, the catalog source language.
    En,
    /// Spanish.
    #[default]
    Es,
    /// German.
    De,
    /// Italian.
    It,
    /// French.
    Fr,
    /// Japanese.
    Ja,
}

impl Language {
    /// Language the catalog descriptions are read in.
    pub const SOURCE: Language = Language::En;

    /// ISO 639-1 code sent to the translation service.
    pub fn code(self) -> &'static str {
        self.into()
    }

    /// Human-readable name for selectors.
    pub fn label(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Spanish",
            Self::De => "German",
            Self::It => "Italian",
            Self::Fr => "French",
            Self::Ja => "Japanese",
        }
    }

    /// Returns true if text in this language must be fetched from a translator.
    pub fn needs_translation(self) -> bool {
        self != Self::SOURCE
    }

    /// Returns the next language, wrapping around after the last.
    #[instrument]
    pub fn cycle(self) -> Self {
        let all: Vec<Self> = Self::iter().collect();
        let index = all.iter().position(|l| *l == self).unwrap_or(0);
        all[(index + 1) % all.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_codes() {
        assert_eq!(Language::Ja.code(), "ja");
        assert_eq!(Language::from_str("de").ok(), Some(Language::De));
        assert_eq!(Language::default(), Language::Es);
    }

    #[test]
    fn test_only_source_skips_translation() {
        assert!(!Language::En.needs_translation());
        assert!(Language::Fr.needs_translation());
    }
}
