// Vocabulary question that gates the next batch of pieces.

use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};
use serde::Serialize;

use crate::vocab::{VocabWord, VocabularySet};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub language: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordChallenge {
    pub word_id: String,
    pub question_text: String,
    pub question_language: String,
    /// Every other translation of the word is accepted.
    pub correct_answers: Vec<Answer>,
    pub attempts: u32,
}

impl WordChallenge {
    /// Prompt with one of the word's languages, picked at random.
    pub fn from_word<R: Rng>(word: &VocabWord, rng: &mut R) -> Option<Self> {
        if !word.is_usable() {
            return None;
        }
        let languages = word.languages();
        let prompt = *languages.choose(rng)?;
        let correct_answers = word
            .translations
            .iter()
            .filter(|(lang, _)| lang.as_str() != prompt)
            .map(|(lang, text)| Answer {
                language: lang.clone(),
                text: text.clone(),
            })
            .collect();
        Some(Self {
            word_id: word.id.clone(),
            question_text: word.translations[prompt].clone(),
            question_language: prompt.to_string(),
            correct_answers,
            attempts: 0,
        })
    }

    /// Sample one usable word of the set. None if the set has none.
    pub fn sample<R: Rng>(set: &VocabularySet, rng: &mut R) -> Option<Self> {
        let word = set.usable_words().choose(rng)?;
        Self::from_word(word, rng)
    }

    /// Case-insensitive exact comparison against every accepted answer.
    pub fn accepts(&self, answer: &str) -> bool {
        let answer = answer.to_lowercase();
        self.correct_answers
            .iter()
            .any(|a| a.text.to_lowercase() == answer)
    }
}
