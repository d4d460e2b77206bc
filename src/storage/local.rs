// Browser localStorage backend.

use web_sys::{Storage, window};

use super::{DEFAULT_STORAGE_KEY, VocabRepository, load_or_empty};
use crate::error::StorageError;
use crate::vocab::VocabularySet;

/// Reads the set collection from `window.localStorage` on every load, so edits
/// made by the vocabulary editor show up in the next game without a reload.
#[derive(Clone, Debug)]
pub struct LocalStorageRepository {
    key: String,
}

impl Default for LocalStorageRepository {
    fn default() -> Self {
        Self::new(DEFAULT_STORAGE_KEY)
    }
}

impl LocalStorageRepository {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<Storage, StorageError> {
        let win = window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        win.local_storage()
            .map_err(|_| StorageError::Unavailable("localStorage access denied".into()))?
            .ok_or_else(|| StorageError::Unavailable("no localStorage".into()))
    }

    fn read_blob(&self) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(&self.key)
            .map_err(|_| StorageError::Unavailable(format!("cannot read {:?}", self.key)))
    }
}

impl VocabRepository for LocalStorageRepository {
    fn load(&self) -> Vec<VocabularySet> {
        match self.read_blob() {
            Ok(raw) => load_or_empty(raw.as_deref()),
            Err(e) => {
                log::warn!("{e}; treating vocabulary collection as empty");
                Vec::new()
            }
        }
    }
}
