//! Canonical species names and the set of names a guess may take.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Gender suffixes the catalog appends to some species names.
const GENDER_SUFFIXES: [&str; 2] = ["-m", "-f"];

/// Reduces a species name or raw guess to its canonical form.
///
/// Trims surrounding whitespace, case-folds, and strips one trailing
/// gender suffix (`-m` or `-f`). `"Nidoran-F "` becomes `"nidoran"`.
pub fn canonical_name(raw: &str) -> String {
    let folded = raw.trim().to_lowercase();
    for suffix in GENDER_SUFFIXES {
        if let Some(stem) = folded.strip_suffix(suffix)
            && !stem.is_empty()
        {
            return stem.to_string();
        }
    }
    folded
}

/// Sorted, deduplicated canonical names of the active generation pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidNameSet {
    names: BTreeSet<String>,
}

impl ValidNameSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the canonical `name` is a member.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the set holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns up to `limit` names starting with the canonical form of `prefix`.
    ///
    /// An empty prefix yields no suggestions.
    #[instrument(skip(self), fields(pool = self.names.len()))]
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<&str> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.names
            .range(prefix.clone()..)
            .take_while(|name| name.starts_with(&prefix))
            .take(limit)
            .map(String::as_str)
            .collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ValidNameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|name| canonical_name(name.as_ref()))
                .filter(|name| !name.is_empty())
                .collect(),
        }
    }
}
