//! Read-only access to the persisted vocabulary sets.
//!
//! The whole collection lives as one JSON blob under a fixed key. Engines get a
//! [`VocabRepository`] at construction and call [`VocabRepository::load`] when
//! a game starts; they never write.

use crate::error::{GameError, StorageError};
use crate::vocab::VocabularySet;

mod local;
mod schema;

pub use local::LocalStorageRepository;
pub use schema::Schema;

/// Key the vocabulary editor stores its sets under.
pub const DEFAULT_STORAGE_KEY: &str = "vocabSets";

/// Source of vocabulary sets for the engines.
pub trait VocabRepository {
    /// All stored sets in canonical shape. Unreadable storage yields an empty list.
    fn load(&self) -> Vec<VocabularySet>;

    fn find(&self, id: &str) -> Option<VocabularySet> {
        self.load().into_iter().find(|s| s.id == id)
    }
}

/// Fixed in-memory collection, used by tests and by hosts that manage storage themselves.
#[derive(Clone, Debug, Default)]
pub struct MemoryRepository {
    sets: Vec<VocabularySet>,
}

impl MemoryRepository {
    pub fn new(sets: Vec<VocabularySet>) -> Self {
        Self { sets }
    }

    /// Build from a stored blob, with the same recovery rules as browser storage.
    pub fn from_blob(raw: &str) -> Self {
        Self::new(load_or_empty(Some(raw)))
    }
}

impl VocabRepository for MemoryRepository {
    fn load(&self) -> Vec<VocabularySet> {
        self.sets.clone()
    }
}

impl<T: VocabRepository + ?Sized> VocabRepository for Box<T> {
    fn load(&self) -> Vec<VocabularySet> {
        (**self).load()
    }
}

/// Resolve the player's chosen set, enforcing the checks shared by every game:
/// a set must be selected, must exist and must contain words.
pub fn select_set<P: VocabRepository + ?Sized>(
    repo: &P,
    set_id: Option<&str>,
) -> Result<VocabularySet, GameError> {
    let id = set_id.ok_or(GameError::NoSetSelected)?;
    let set = repo
        .find(id)
        .ok_or_else(|| GameError::UnknownSet(id.to_string()))?;
    if set.words.is_empty() {
        return Err(GameError::EmptySet);
    }
    Ok(set)
}

/// Parse a stored blob (a JSON array of set records in either schema) and
/// normalize every record.
pub fn parse_sets(raw: &str) -> Result<Vec<VocabularySet>, StorageError> {
    let stored: Vec<schema::StoredSet> = serde_json::from_str(raw)?;
    let legacy = stored.iter().filter(|s| s.schema() == Schema::V1).count();
    if legacy > 0 {
        log::debug!("migrating {legacy} vocabulary set(s) from the v1 record shape");
    }
    Ok(stored.into_iter().map(schema::StoredSet::normalize).collect())
}

/// Missing blobs and parse failures both degrade to an empty collection.
pub fn load_or_empty(raw: Option<&str>) -> Vec<VocabularySet> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match parse_sets(raw) {
        Ok(sets) => sets,
        Err(e) => {
            log::warn!("{e}; treating vocabulary collection as empty");
            Vec::new()
        }
    }
}
