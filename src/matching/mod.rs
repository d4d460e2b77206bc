//! Matching game: find the two cards that carry the same word in different
//! languages.
//!
//! `idle -> playing -> completed`, with `playing` re-entered by `start`.
//! Picking a second card schedules resolution after a short debounce; a match
//! or mismatch then shows feedback for a fixed window before it is committed.
//! While the pending pair is unresolved, further picks are ignored.

use rand::Rng;
use serde::Serialize;

use crate::config::MatchingConfig;
use crate::error::GameError;
use crate::scheduler::{Scheduler, SecondClock};
use crate::storage::{VocabRepository, select_set};

mod deck;

pub use deck::{MatchCard, deal};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchingState {
    Idle,
    Playing,
    Completed,
}

/// Final figures reported once per finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub elapsed_secs: u32,
    pub moves: u32,
    pub matched_pairs: usize,
}

impl MatchSummary {
    /// Elapsed time as `m:ss`.
    pub fn formatted_time(&self) -> String {
        format!("{}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MatchEvent {
    Matched { word_id: String },
    Mismatched,
    Completed(MatchSummary),
}

impl MatchEvent {
    /// Particle count for the celebration burst, if this event earns one.
    pub fn celebration(&self) -> Option<u32> {
        match self {
            MatchEvent::Completed(_) => Some(100),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    Resolve,
    CommitMatch,
    ClearMismatch,
}

/// Render-ready view of the engine.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingSnapshot<'a> {
    pub state: MatchingState,
    pub cards: &'a [MatchCard],
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub moves: u32,
    pub elapsed_secs: u32,
}

pub struct MatchingEngine<P, R> {
    repo: P,
    rng: R,
    config: MatchingConfig,
    state: MatchingState,
    cards: Vec<MatchCard>,
    /// Ids of picked cards awaiting resolution (at most 2).
    pending: Vec<String>,
    matched_pairs: usize,
    total_pairs: usize,
    moves: u32,
    elapsed_secs: u32,
    clock: Option<SecondClock>,
    scheduler: Scheduler<Transition>,
    events: Vec<MatchEvent>,
}

impl<P: VocabRepository, R: Rng> MatchingEngine<P, R> {
    pub fn new(repo: P, rng: R, config: MatchingConfig) -> Self {
        Self {
            repo,
            rng,
            config,
            state: MatchingState::Idle,
            cards: Vec::new(),
            pending: Vec::with_capacity(2),
            matched_pairs: 0,
            total_pairs: 0,
            moves: 0,
            elapsed_secs: 0,
            clock: None,
            scheduler: Scheduler::new(),
            events: Vec::new(),
        }
    }

    /// Deal a fresh game from the chosen set. On error nothing changes.
    pub fn start(&mut self, set_id: Option<&str>, now_ms: f64) -> Result<(), GameError> {
        let set = select_set(&self.repo, set_id)?;
        if !set.has_usable_words() {
            return Err(GameError::NoUsableWords);
        }
        let (cards, pairs) = deal(&set.words, self.config.max_words, &mut self.rng);

        self.clear();
        self.cards = cards;
        self.total_pairs = pairs;
        self.clock = Some(SecondClock::new(now_ms));
        self.state = MatchingState::Playing;
        log::debug!("matching: dealt {} cards from set {:?}", self.cards.len(), set.id);
        Ok(())
    }

    /// Drop the current game and any feedback still in flight.
    pub fn reset(&mut self) {
        self.clear();
        self.state = MatchingState::Idle;
    }

    fn clear(&mut self) {
        self.scheduler.cancel_all();
        self.cards.clear();
        self.pending.clear();
        self.events.clear();
        self.matched_pairs = 0;
        self.total_pairs = 0;
        self.moves = 0;
        self.elapsed_secs = 0;
        self.clock = None;
    }

    /// Pick a card. Returns false when the pick is ignored.
    pub fn select_card(&mut self, card_id: &str, now_ms: f64) -> bool {
        if self.state != MatchingState::Playing || self.pending.len() >= 2 {
            return false;
        }
        let Some(card) = self.cards.iter_mut().find(|c| c.id == card_id) else {
            return false;
        };
        if card.is_selected || card.is_matched {
            return false;
        }
        card.is_selected = true;
        self.pending.push(card.id.clone());
        if self.pending.len() == 2 {
            self.scheduler
                .schedule(now_ms, self.config.resolve_delay_ms, Transition::Resolve);
        }
        true
    }

    /// Fire due transitions and advance the elapsed-seconds counter.
    pub fn tick(&mut self, now_ms: f64) {
        while let Some((at_ms, transition)) = self.scheduler.pop_due(now_ms) {
            self.advance_clock(at_ms);
            self.fire(transition, at_ms);
        }
        self.advance_clock(now_ms);
    }

    fn advance_clock(&mut self, now_ms: f64) {
        if self.state != MatchingState::Playing {
            return;
        }
        if let Some(clock) = self.clock.as_mut() {
            self.elapsed_secs += clock.advance(now_ms);
        }
    }

    fn fire(&mut self, transition: Transition, at_ms: f64) {
        match transition {
            Transition::Resolve => self.resolve(at_ms),
            Transition::CommitMatch => {
                self.update_pending(|c| {
                    c.is_matched = true;
                    c.is_correct_match = false;
                    c.is_selected = false;
                });
                let word_id = self.pending_pair().map(|(a, _)| a.word_id.clone());
                self.pending.clear();
                self.matched_pairs += 1;
                if let Some(word_id) = word_id {
                    self.events.push(MatchEvent::Matched { word_id });
                }
                self.check_completion();
            }
            Transition::ClearMismatch => {
                self.update_pending(|c| {
                    c.is_selected = false;
                    c.is_incorrect_match = false;
                });
                self.pending.clear();
                self.events.push(MatchEvent::Mismatched);
            }
        }
    }

    fn resolve(&mut self, at_ms: f64) {
        self.moves += 1;
        let is_match = self
            .pending_pair()
            .is_some_and(|(a, b)| a.word_id == b.word_id && a.id != b.id);
        log::debug!("matching: move {} resolved, match = {is_match}", self.moves);
        if is_match {
            self.update_pending(|c| c.is_correct_match = true);
            self.scheduler
                .schedule(at_ms, self.config.match_feedback_ms, Transition::CommitMatch);
        } else {
            self.update_pending(|c| c.is_incorrect_match = true);
            self.scheduler.schedule(
                at_ms,
                self.config.mismatch_feedback_ms,
                Transition::ClearMismatch,
            );
        }
    }

    fn pending_pair(&self) -> Option<(&MatchCard, &MatchCard)> {
        let [first, second] = self.pending.as_slice() else {
            return None;
        };
        let a = self.cards.iter().find(|c| &c.id == first)?;
        let b = self.cards.iter().find(|c| &c.id == second)?;
        Some((a, b))
    }

    fn update_pending(&mut self, mut f: impl FnMut(&mut MatchCard)) {
        let pending = &self.pending;
        self.cards
            .iter_mut()
            .filter(|c| pending.contains(&c.id))
            .for_each(|c| f(c));
    }

    // Guarded by state, so re-running it never reports a second completion.
    fn check_completion(&mut self) {
        if self.state == MatchingState::Playing
            && self.total_pairs > 0
            && self.matched_pairs == self.total_pairs
        {
            self.state = MatchingState::Completed;
            self.clock = None;
            let summary = self.summary();
            log::debug!("matching: completed in {}", summary.formatted_time());
            self.events.push(MatchEvent::Completed(summary));
        }
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            elapsed_secs: self.elapsed_secs,
            moves: self.moves,
            matched_pairs: self.matched_pairs,
        }
    }

    pub fn state(&self) -> MatchingState {
        self.state
    }

    /// True while the game needs ticks (clock running or feedback in flight).
    pub fn is_active(&self) -> bool {
        self.state == MatchingState::Playing || !self.scheduler.is_idle()
    }

    pub fn cards(&self) -> &[MatchCard] {
        &self.cards
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> MatchingSnapshot<'_> {
        MatchingSnapshot {
            state: self.state,
            cards: &self.cards,
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs,
            moves: self.moves,
            elapsed_secs: self.elapsed_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::storage::MemoryRepository;
    use crate::vocab::fixtures::{cat_dog, set, word};

    type Engine = MatchingEngine<MemoryRepository, StdRng>;

    fn engine() -> Engine {
        let repo = MemoryRepository::new(vec![cat_dog()]);
        MatchingEngine::new(repo, StdRng::seed_from_u64(3), MatchingConfig::default())
    }

    fn card_id(e: &Engine, text: &str) -> String {
        e.cards().iter().find(|c| c.text == text).unwrap().id.clone()
    }

    #[test]
    fn start_rejects_bad_sets_without_side_effects() {
        let repo = MemoryRepository::new(vec![
            set("empty", vec![]),
            set("mono", vec![word("a", &[("en", "cat")])]),
        ]);
        let mut e = MatchingEngine::new(repo, StdRng::seed_from_u64(0), MatchingConfig::default());
        assert_eq!(e.start(None, 0.0), Err(GameError::NoSetSelected));
        assert_eq!(e.start(Some("empty"), 0.0), Err(GameError::EmptySet));
        assert_eq!(e.start(Some("mono"), 0.0), Err(GameError::NoUsableWords));
        assert_eq!(e.state(), MatchingState::Idle);
        assert!(e.cards().is_empty());
    }

    #[test]
    fn third_pick_is_ignored_while_pair_pending() {
        let mut e = engine();
        e.start(Some("animals"), 0.0).unwrap();
        let cat = card_id(&e, "cat");
        let dog = card_id(&e, "dog");
        let cho = card_id(&e, "chó");
        assert!(e.select_card(&cat, 0.0));
        assert!(!e.select_card(&cat, 0.0));
        assert!(e.select_card(&dog, 0.0));
        assert!(!e.select_card(&cho, 0.0));
        assert_eq!(e.cards().iter().filter(|c| c.is_selected).count(), 2);
    }

    #[test]
    fn resolution_waits_for_debounce() {
        let mut e = engine();
        e.start(Some("animals"), 0.0).unwrap();
        let cat = card_id(&e, "cat");
        let meo = card_id(&e, "mèo");
        e.select_card(&cat, 0.0);
        e.select_card(&meo, 0.0);
        e.tick(299.0);
        assert_eq!(e.snapshot().moves, 0);
        e.tick(300.0);
        assert_eq!(e.snapshot().moves, 1);
        assert!(e.cards().iter().filter(|c| c.is_correct_match).count() == 2);
    }

    #[test]
    fn reset_cancels_in_flight_feedback() {
        let mut e = engine();
        e.start(Some("animals"), 0.0).unwrap();
        let cat = card_id(&e, "cat");
        let meo = card_id(&e, "mèo");
        e.select_card(&cat, 0.0);
        e.select_card(&meo, 0.0);
        e.tick(350.0);
        e.start(Some("animals"), 400.0).unwrap();
        e.tick(5_000.0);
        let snap = e.snapshot();
        assert_eq!(snap.moves, 0);
        assert_eq!(snap.matched_pairs, 0);
        assert!(e.cards().iter().all(|c| !c.is_matched && !c.is_correct_match));
        assert!(e.pending().is_empty());
    }

    #[test]
    fn clock_stops_at_completion() {
        let mut e = engine();
        e.start(Some("animals"), 0.0).unwrap();
        for (a, b) in [("cat", "mèo"), ("dog", "chó")] {
            let (a, b) = (card_id(&e, a), card_id(&e, b));
            e.select_card(&a, 1_000.0);
            e.select_card(&b, 1_000.0);
            e.tick(1_000.0);
            e.tick(1_800.0);
        }
        assert_eq!(e.state(), MatchingState::Completed);
        let at_completion = e.summary();
        e.tick(60_000.0);
        assert_eq!(e.summary(), at_completion);
        assert_eq!(at_completion.elapsed_secs, 1);
        assert!(!e.is_active());
    }

    #[test]
    fn formatted_time_pads_seconds() {
        let s = MatchSummary {
            elapsed_secs: 65,
            moves: 0,
            matched_pairs: 0,
        };
        assert_eq!(s.formatted_time(), "1:05");
    }
}
