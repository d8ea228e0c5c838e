use serde::{Deserialize, Deserializer};

use crate::Variant;

/// Run-wide filtering preferences. Immutable once the engine is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FilterConfig {
    pub variant: Variant,
    #[serde(default)]
    pub enter_pinned: bool,
    #[serde(default)]
    pub min_points: u32,
    /// Lowercase, non-blank substrings. Deserializing normalizes them.
    #[serde(default, deserialize_with = "deserialize_words")]
    pub ignored_words: Vec<String>,
}

impl FilterConfig {
    /// Builds a config with ignore words lowercased and blanks dropped.
    pub fn new(
        variant: Variant,
        enter_pinned: bool,
        min_points: u32,
        ignored_words: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Self {
        Self {
            variant,
            enter_pinned,
            min_points,
            ignored_words: normalize_words(ignored_words),
        }
    }

    /// Re-applies ignore word normalization, e.g. after deserializing.
    pub fn normalized(self) -> Self {
        Self::new(
            self.variant,
            self.enter_pinned,
            self.min_points,
            self.ignored_words,
        )
    }
}

fn deserialize_words<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer).map(normalize_words)
}

fn normalize_words(words: impl IntoIterator<Item = impl AsRef<str>>) -> Vec<String> {
    words
        .into_iter()
        .map(|word| word.as_ref().trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}
