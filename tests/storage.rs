// Persisted-blob handling: schema migration and recovery, seen through the engines.

use rand::SeedableRng;
use rand::rngs::StdRng;
use vocab_games::storage::{load_or_empty, parse_sets};
use vocab_games::{
    GameError, MatchingConfig, MatchingEngine, MatchingState, MemoryRepository, VocabRepository,
};

const LEGACY: &str = r#"[{
    "id": "1700000000000", "name": "Old set",
    "sourceLanguage": "english", "targetLanguage": "vietnamese",
    "words": [
        {"id": "1", "word": "cat", "meaning": "mèo", "createdAt": "2024-01-01T00:00:00.000Z"},
        {"id": "2", "word": "dog", "meaning": "chó", "createdAt": "2024-01-01T00:00:00.000Z"}
    ],
    "createdAt": "2024-01-01T00:00:00.000Z"
}]"#;

#[test]
fn legacy_sets_are_playable_after_migration() {
    let sets = parse_sets(LEGACY).unwrap();
    assert_eq!(sets[0].languages, ["english", "vietnamese"]);
    assert!(sets[0].words.iter().all(|w| w.is_usable()));

    let repo = MemoryRepository::new(sets);
    let mut e = MatchingEngine::new(repo, StdRng::seed_from_u64(0), MatchingConfig::default());
    e.start(Some("1700000000000"), 0.0).unwrap();
    assert_eq!(e.state(), MatchingState::Playing);
    assert_eq!(e.cards().len(), 4);
}

#[test]
fn corrupt_blob_behaves_like_no_sets() {
    let repo = MemoryRepository::from_blob("[{\"id\": ");
    assert!(repo.load().is_empty());
    let mut e = MatchingEngine::new(repo, StdRng::seed_from_u64(0), MatchingConfig::default());
    assert_eq!(
        e.start(Some("1700000000000"), 0.0),
        Err(GameError::UnknownSet("1700000000000".into()))
    );
    assert_eq!(e.state(), MatchingState::Idle);
}

#[test]
fn missing_blob_is_empty() {
    assert!(load_or_empty(None).is_empty());
    assert!(load_or_empty(Some("[]")).is_empty());
}
