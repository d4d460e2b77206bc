//! Canonical vocabulary records shared by every game engine.
//!
//! Records arrive here already normalized by [`crate::storage`]; engines only
//! ever read them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single word with its translations keyed by language code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabWord {
    pub id: String,
    /// Partial: not every word carries every language of its set.
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
    #[serde(default)]
    pub created_at: String,
}

impl VocabWord {
    /// A word can be played once it has text in at least two languages.
    pub fn is_usable(&self) -> bool {
        self.translations.len() >= 2
    }

    /// Language codes this word has text for, in stable (sorted) order.
    pub fn languages(&self) -> Vec<&str> {
        self.translations.keys().map(String::as_str).collect()
    }
}

/// A named, user-created collection of words across a fixed list of languages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularySet {
    pub id: String,
    pub name: String,
    pub languages: Vec<String>,
    #[serde(default)]
    pub words: Vec<VocabWord>,
    #[serde(default)]
    pub created_at: String,
}

impl VocabularySet {
    pub fn usable_words(&self) -> impl Iterator<Item = &VocabWord> {
        self.words.iter().filter(|w| w.is_usable())
    }

    pub fn has_usable_words(&self) -> bool {
        self.usable_words().next().is_some()
    }
}

// Display labels for the language codes the vocabulary editor offers.
const LANGUAGE_LABELS: &[(&str, &str)] = &[
    ("english", "English"),
    ("vietnamese", "Vietnamese"),
    ("japanese", "Japanese"),
    ("french", "French"),
    ("spanish", "Spanish"),
    ("german", "German"),
    ("chinese", "Chinese"),
    ("korean", "Korean"),
    ("russian", "Russian"),
];

/// Human-readable name for a language code; unknown codes are shown as-is.
pub fn language_label(code: &str) -> &str {
    LANGUAGE_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
        .unwrap_or(code)
}
