//! Vocab Games core crate.
//!
//! Two small game engines practice the player's own vocabulary sets:
//! a card matching game ([`matching`]) and a block puzzle gated behind word
//! questions ([`puzzle`]). Both read sets through a [`storage::VocabRepository`]
//! and take the caller's clock (`now_ms`), so they run natively in tests and in
//! the browser behind the [`web`] classes alike.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod effects;
pub mod error;
pub mod logging;
pub mod matching;
pub mod puzzle;
pub mod scheduler;
pub mod storage;
pub mod vocab;
pub mod web;

pub use config::{GameConfig, MatchingConfig, PuzzleConfig};
pub use error::{ConfigError, GameError, StorageError};
pub use matching::{MatchCard, MatchEvent, MatchSummary, MatchingEngine, MatchingState};
pub use puzzle::{AnswerOutcome, PuzzleEngine, PuzzleEvent, PuzzleState, PuzzleSummary};
pub use storage::{LocalStorageRepository, MemoryRepository, VocabRepository};
pub use vocab::{VocabWord, VocabularySet};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logging::init(if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });
}
