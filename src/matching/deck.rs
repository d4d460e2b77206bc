use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::vocab::VocabWord;

/// One face-up word card. Two cards share a `word_id` and form a pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCard {
    /// `"{word_id}-{language}"`, unique within a game.
    pub id: String,
    pub word_id: String,
    pub text: String,
    pub language: String,
    pub is_selected: bool,
    /// Matched cards stay in the deck, hidden.
    pub is_matched: bool,
    pub is_correct_match: bool,
    pub is_incorrect_match: bool,
}

impl MatchCard {
    fn new(word: &VocabWord, language: &str, text: &str) -> Self {
        Self {
            id: format!("{}-{}", word.id, language),
            word_id: word.id.clone(),
            text: text.to_string(),
            language: language.to_string(),
            is_selected: false,
            is_matched: false,
            is_correct_match: false,
            is_incorrect_match: false,
        }
    }
}

/// Sample up to `max_words` usable words and deal two cards per word, in two
/// randomly chosen languages. Returns the shuffled deck and the number of pairs.
pub fn deal<'a, R: Rng>(
    words: impl IntoIterator<Item = &'a VocabWord>,
    max_words: usize,
    rng: &mut R,
) -> (Vec<MatchCard>, usize) {
    let mut pool: Vec<&VocabWord> = words.into_iter().filter(|w| w.is_usable()).collect();
    pool.shuffle(rng);
    pool.truncate(max_words);

    let mut cards = Vec::with_capacity(pool.len() * 2);
    for word in &pool {
        let languages = word.languages();
        for lang in languages.choose_multiple(rng, 2) {
            cards.push(MatchCard::new(word, lang, &word.translations[*lang]));
        }
    }
    cards.shuffle(rng);
    (cards, pool.len())
}
