// Stored record shapes and their normalization into the canonical vocab types.
//
// Two shapes exist in the wild:
// - v1: `sourceLanguage` / `targetLanguage` on the set, `word` / `meaning` on each word.
// - v2: `languages` on the set, `translations` map on each word.
// Records are parsed permissively and normalized once; engines only see v2.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::vocab::{VocabWord, VocabularySet};

/// Record layout version detected on a stored set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schema {
    /// `sourceLanguage` / `targetLanguage` + `word` / `meaning`.
    V1,
    /// `languages` + `translations`.
    V2,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(s) => vec![s],
            OneOrMany::Many(v) => v,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredWord {
    id: String,
    translations: Option<BTreeMap<String, String>>,
    word: Option<String>,
    meaning: Option<String>,
    #[serde(default)]
    created_at: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StoredSet {
    id: String,
    #[serde(default)]
    name: String,
    languages: Option<Vec<String>>,
    source_language: Option<OneOrMany>,
    target_language: Option<String>,
    #[serde(default)]
    words: Vec<StoredWord>,
    #[serde(default)]
    created_at: String,
}

impl StoredSet {
    pub fn schema(&self) -> Schema {
        if self.languages.is_some() { Schema::V2 } else { Schema::V1 }
    }

    /// Convert to the canonical shape. v1 languages become the union of the
    /// source languages and the target language (order kept, duplicates dropped).
    pub fn normalize(self) -> VocabularySet {
        let sources = self.source_language.map(OneOrMany::into_vec).unwrap_or_default();
        let source = sources.first().cloned();
        let target = self.target_language.clone();

        let languages = match self.languages {
            Some(langs) => langs,
            None => {
                let mut langs: Vec<String> = Vec::new();
                for l in sources.into_iter().chain(target.clone()) {
                    if !langs.contains(&l) {
                        langs.push(l);
                    }
                }
                langs
            }
        };

        let words = self
            .words
            .into_iter()
            .map(|w| w.normalize(source.as_deref(), target.as_deref()))
            .collect();

        VocabularySet {
            id: self.id,
            name: self.name,
            languages,
            words,
            created_at: self.created_at,
        }
    }
}

impl StoredWord {
    fn normalize(self, source: Option<&str>, target: Option<&str>) -> VocabWord {
        let mut translations = self.translations.unwrap_or_default();
        // A v1 word keeps its `word` text if source and target share a code.
        if let (Some(lang), Some(text)) = (source, self.word) {
            translations.entry(lang.to_string()).or_insert(text);
        }
        if let (Some(lang), Some(text)) = (target, self.meaning) {
            translations.entry(lang.to_string()).or_insert(text);
        }
        VocabWord {
            id: self.id,
            translations,
            created_at: self.created_at,
        }
    }
}
