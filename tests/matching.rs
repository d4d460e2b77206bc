// Integration tests (native) for the matching engine.
// These tests avoid wasm-specific functionality and drive the engine through
// its public API with an in-memory repository and a seeded RNG.

use std::collections::HashMap;

use rand::SeedableRng;
use rand::rngs::StdRng;
use vocab_games::{
    MatchEvent, MatchingConfig, MatchingEngine, MatchingState, MemoryRepository,
};

const ANIMALS: &str = r#"[{
    "id": "animals", "name": "Animals", "languages": ["en", "vi"],
    "words": [
        {"id": "A", "translations": {"en": "cat", "vi": "mèo"}},
        {"id": "B", "translations": {"en": "dog", "vi": "chó"}}
    ]
}]"#;

type Engine = MatchingEngine<MemoryRepository, StdRng>;

fn started(seed: u64) -> Engine {
    let repo = MemoryRepository::from_blob(ANIMALS);
    let mut e = MatchingEngine::new(repo, StdRng::seed_from_u64(seed), MatchingConfig::default());
    e.start(Some("animals"), 0.0).unwrap();
    e
}

fn id_of(e: &Engine, text: &str) -> String {
    e.cards()
        .iter()
        .find(|c| c.text == text)
        .map(|c| c.id.clone())
        .unwrap()
}

#[test]
fn deck_has_one_pair_per_word() {
    let e = started(1);
    assert_eq!(e.cards().len(), 4);
    let mut per_word: HashMap<&str, usize> = HashMap::new();
    for c in e.cards() {
        *per_word.entry(c.word_id.as_str()).or_default() += 1;
    }
    assert_eq!(per_word.get("A"), Some(&2));
    assert_eq!(per_word.get("B"), Some(&2));
    assert_eq!(e.snapshot().total_pairs, 2);
}

#[test]
fn cat_and_meo_resolve_to_match() {
    let mut e = started(2);
    let (cat, meo) = (id_of(&e, "cat"), id_of(&e, "mèo"));
    assert!(e.select_card(&cat, 0.0));
    assert!(e.select_card(&meo, 0.0));

    e.tick(300.0);
    assert!(e.cards().iter().filter(|c| c.is_correct_match).count() == 2);
    assert_eq!(e.snapshot().matched_pairs, 0);

    e.tick(700.0);
    let matched: Vec<_> = e.cards().iter().filter(|c| c.is_matched).collect();
    assert_eq!(matched.len(), 2);
    assert!(matched.iter().all(|c| c.word_id == "A" && !c.is_selected && !c.is_correct_match));
    assert_eq!(e.snapshot().matched_pairs, 1);
    assert!(e.pending().is_empty());
    assert_eq!(
        e.drain_events(),
        [MatchEvent::Matched { word_id: "A".into() }]
    );
}

#[test]
fn cat_and_dog_resolve_to_mismatch() {
    let mut e = started(3);
    let (cat, dog) = (id_of(&e, "cat"), id_of(&e, "dog"));
    e.select_card(&cat, 0.0);
    e.select_card(&dog, 0.0);

    e.tick(300.0);
    assert_eq!(e.cards().iter().filter(|c| c.is_incorrect_match).count(), 2);
    assert!(e.cards().iter().all(|c| !c.is_correct_match));

    e.tick(900.0);
    assert!(e.cards().iter().all(|c| !c.is_selected && !c.is_incorrect_match));
    assert_eq!(e.snapshot().matched_pairs, 0);
    assert_eq!(e.snapshot().moves, 1);
    assert!(e.pending().is_empty());
    assert_eq!(e.drain_events(), [MatchEvent::Mismatched]);
}

#[test]
fn matched_card_cannot_be_selected_again() {
    let mut e = started(4);
    let (cat, meo) = (id_of(&e, "cat"), id_of(&e, "mèo"));
    e.select_card(&cat, 0.0);
    e.select_card(&meo, 0.0);
    e.tick(1_000.0);
    assert!(!e.select_card(&cat, 1_000.0));
    assert!(!e.select_card("no-such-card", 1_000.0));
}

#[test]
fn completion_fires_exactly_once() {
    let mut e = started(5);
    let mut now = 0.0;
    for (a, b) in [("cat", "mèo"), ("dog", "chó")] {
        let (a, b) = (id_of(&e, a), id_of(&e, b));
        e.select_card(&a, now);
        e.select_card(&b, now);
        now += 2_500.0;
        e.tick(now);
    }
    assert_eq!(e.state(), MatchingState::Completed);
    for _ in 0..5 {
        now += 1_000.0;
        e.tick(now);
    }
    let completions: Vec<_> = e
        .drain_events()
        .into_iter()
        .filter_map(|ev| match ev {
            MatchEvent::Completed(s) => Some(s),
            _ => None,
        })
        .collect();
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].moves, 2);
    assert_eq!(completions[0].matched_pairs, 2);
    assert_eq!(completions[0].elapsed_secs, 3);
    // Picks after completion are ignored.
    assert!(!e.select_card(&id_of(&e, "cat"), now));
}

#[test]
fn timer_counts_seconds_while_playing() {
    let mut e = started(6);
    e.tick(999.0);
    assert_eq!(e.snapshot().elapsed_secs, 0);
    e.tick(3_200.0);
    assert_eq!(e.snapshot().elapsed_secs, 3);
    e.reset();
    e.tick(10_000.0);
    assert_eq!(e.snapshot().elapsed_secs, 0);
    assert_eq!(e.state(), MatchingState::Idle);
}
