//! Block puzzle gated by vocabulary questions.
//!
//! `answering -> placing -> answering -> ... -> gameOver`. A correct answer
//! rewards a batch of random pieces; placing them fills a 9x9 grid where full
//! rows and columns clear for points. The game ends when none of the pieces in
//! hand fits anywhere.

use rand::Rng;
use serde::Serialize;

use crate::config::PuzzleConfig;
use crate::error::GameError;
use crate::scheduler::{Scheduler, Ticket};
use crate::storage::{VocabRepository, select_set};
use crate::vocab::VocabularySet;

mod challenge;
mod drag;
mod grid;
mod pieces;

pub use challenge::{Answer, WordChallenge};
pub use drag::{BoardRect, DragState, DragTracker, Point};
pub use grid::{Cleared, GRID_SIZE, Grid};
pub use pieces::{Color, Piece, PieceGenerator, SHAPES, Shape};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PuzzleState {
    Answering,
    Placing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleSummary {
    pub score: u32,
    pub correct_words: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PuzzleEvent {
    Correct { pieces: usize },
    Wrong { remaining_attempts: u32 },
    Revealed { answers: Vec<Answer> },
    Skipped,
    LinesCleared { lines: usize, points: u32 },
    GameOver(PuzzleSummary),
}

impl PuzzleEvent {
    /// Particle count for the celebration burst, if this event earns one.
    pub fn celebration(&self) -> Option<u32> {
        match self {
            PuzzleEvent::GameOver(_) => Some(100),
            PuzzleEvent::Correct { .. } | PuzzleEvent::LinesCleared { .. } => Some(50),
            _ => None,
        }
    }
}

/// Result of submitting an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// No challenge is open (or its answers are being revealed).
    Ignored,
    Correct,
    Wrong { remaining_attempts: u32 },
    /// Attempts exhausted; the answers are shown before the next challenge.
    Revealed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Transition {
    EndReveal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleSnapshot<'a> {
    pub state: PuzzleState,
    pub playing: bool,
    pub grid: &'a Grid,
    pub pieces: &'a [Piece],
    pub challenge: Option<&'a WordChallenge>,
    pub revealing: bool,
    pub score: u32,
    pub correct_words: u32,
    pub drag: Option<&'a DragState>,
}

pub struct PuzzleEngine<P, R> {
    repo: P,
    rng: R,
    config: PuzzleConfig,
    set: Option<VocabularySet>,
    playing: bool,
    state: PuzzleState,
    grid: Grid,
    pieces: Vec<Piece>,
    generator: PieceGenerator,
    challenge: Option<WordChallenge>,
    reveal: Option<Ticket>,
    score: u32,
    correct_words: u32,
    drag: DragTracker,
    scheduler: Scheduler<Transition>,
    events: Vec<PuzzleEvent>,
}

impl<P: VocabRepository, R: Rng> PuzzleEngine<P, R> {
    pub fn new(repo: P, rng: R, config: PuzzleConfig) -> Self {
        Self {
            repo,
            rng,
            config,
            set: None,
            playing: false,
            state: PuzzleState::Answering,
            grid: Grid::new(),
            pieces: Vec::new(),
            generator: PieceGenerator::default(),
            challenge: None,
            reveal: None,
            score: 0,
            correct_words: 0,
            drag: DragTracker::default(),
            scheduler: Scheduler::new(),
            events: Vec::new(),
        }
    }

    /// Begin a new game on an empty grid and open the first challenge.
    /// On error nothing changes.
    pub fn start(&mut self, set_id: Option<&str>) -> Result<(), GameError> {
        let set = select_set(&self.repo, set_id)?;
        if !set.has_usable_words() {
            return Err(GameError::NoUsableWords);
        }
        self.reset();
        log::debug!("puzzle: starting with set {:?}", set.id);
        self.set = Some(set);
        self.playing = true;
        self.request_challenge();
        Ok(())
    }

    /// Back to an idle, empty board. Pending reveals are dropped.
    pub fn reset(&mut self) {
        self.scheduler.cancel_all();
        self.set = None;
        self.playing = false;
        self.state = PuzzleState::Answering;
        self.grid = Grid::new();
        self.pieces.clear();
        self.challenge = None;
        self.reveal = None;
        self.score = 0;
        self.correct_words = 0;
        self.drag.cancel();
        self.events.clear();
    }

    fn request_challenge(&mut self) {
        if !self.playing || self.state != PuzzleState::Answering || self.challenge.is_some() {
            return;
        }
        let Some(set) = self.set.as_ref() else {
            return;
        };
        match WordChallenge::sample(set, &mut self.rng) {
            Some(c) => self.challenge = Some(c),
            None => self.end_game(),
        }
    }

    pub fn check_answer(&mut self, answer: &str, now_ms: f64) -> AnswerOutcome {
        if !self.playing || self.state != PuzzleState::Answering || self.reveal.is_some() {
            return AnswerOutcome::Ignored;
        }
        let Some(challenge) = self.challenge.as_mut() else {
            return AnswerOutcome::Ignored;
        };

        if challenge.accepts(answer) {
            self.correct_words += 1;
            self.challenge = None;
            self.reward();
            return AnswerOutcome::Correct;
        }

        challenge.attempts += 1;
        if challenge.attempts >= self.config.max_attempts {
            let answers = challenge.correct_answers.clone();
            self.reveal = Some(self.scheduler.schedule(
                now_ms,
                self.config.reveal_ms,
                Transition::EndReveal,
            ));
            self.events.push(PuzzleEvent::Revealed { answers });
            AnswerOutcome::Revealed
        } else {
            let remaining_attempts = self.config.max_attempts - challenge.attempts;
            self.events.push(PuzzleEvent::Wrong { remaining_attempts });
            AnswerOutcome::Wrong { remaining_attempts }
        }
    }

    /// Drop the open challenge (even mid-reveal) and ask another one.
    pub fn skip(&mut self) -> bool {
        if !self.playing || self.state != PuzzleState::Answering || self.challenge.is_none() {
            return false;
        }
        if let Some(ticket) = self.reveal.take() {
            self.scheduler.cancel(ticket);
        }
        self.challenge = None;
        self.events.push(PuzzleEvent::Skipped);
        self.request_challenge();
        true
    }

    // A fresh batch replaces any unplaced leftovers.
    fn reward(&mut self) {
        self.pieces = self
            .generator
            .batch(self.config.pieces_per_reward, &mut self.rng);
        self.state = PuzzleState::Placing;
        self.events.push(PuzzleEvent::Correct {
            pieces: self.pieces.len(),
        });
        self.check_game_over();
    }

    pub fn can_place(&self, piece_index: usize, row: usize, col: usize) -> bool {
        self.pieces
            .get(piece_index)
            .is_some_and(|p| self.grid.can_place(p, row, col))
    }

    /// Place a piece from hand. Illegal placements are no-ops returning false.
    pub fn place(&mut self, piece_index: usize, row: usize, col: usize) -> bool {
        if !self.playing || self.state != PuzzleState::Placing {
            return false;
        }
        let Some(piece) = self.pieces.get(piece_index) else {
            return false;
        };
        if !self.grid.place(piece, row, col) {
            return false;
        }
        let piece = self.pieces.remove(piece_index);
        log::debug!("puzzle: placed {} at ({row}, {col})", piece.id);

        let cleared = self.grid.clear_full_lines();
        let lines = cleared.lines();
        if lines > 0 {
            let points = lines as u32 * self.config.points_per_line;
            self.score += points;
            log::debug!("puzzle: cleared rows {:?} cols {:?}", cleared.rows, cleared.cols);
            self.events.push(PuzzleEvent::LinesCleared { lines, points });
        }

        if self.pieces.is_empty() {
            self.state = PuzzleState::Answering;
            self.request_challenge();
        } else {
            self.check_game_over();
        }
        true
    }

    fn check_game_over(&mut self) {
        if self.state == PuzzleState::Placing
            && !self.pieces.is_empty()
            && !self.pieces.iter().any(|p| self.grid.fits_anywhere(p))
        {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        self.state = PuzzleState::GameOver;
        self.playing = false;
        self.drag.cancel();
        self.scheduler.cancel_all();
        self.reveal = None;
        let summary = self.summary();
        log::debug!("puzzle: game over, score {}", summary.score);
        self.events.push(PuzzleEvent::GameOver(summary));
    }

    /// Pick up a piece from hand. Only while placing.
    pub fn begin_drag(&mut self, piece_index: usize, at: Point) -> bool {
        if !self.playing || self.state != PuzzleState::Placing || piece_index >= self.pieces.len() {
            return false;
        }
        self.drag.begin(piece_index, at);
        true
    }

    pub fn drag_to(&mut self, at: Point, board: &BoardRect) {
        self.drag.move_to(at, board);
    }

    /// Drop the dragged piece at the last cell under the pointer. The drag is
    /// cleared whether or not the placement succeeds.
    pub fn end_drag(&mut self) -> bool {
        match self.drag.release() {
            Some((index, (row, col))) => self.place(index, row, col),
            None => false,
        }
    }

    pub fn tick(&mut self, now_ms: f64) {
        while let Some((_, transition)) = self.scheduler.pop_due(now_ms) {
            match transition {
                Transition::EndReveal => {
                    self.reveal = None;
                    self.challenge = None;
                    self.request_challenge();
                }
            }
        }
    }

    pub fn summary(&self) -> PuzzleSummary {
        PuzzleSummary {
            score: self.score,
            correct_words: self.correct_words,
        }
    }

    pub fn state(&self) -> PuzzleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.playing
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn challenge(&self) -> Option<&WordChallenge> {
        self.challenge.as_ref()
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.is_some()
    }

    pub fn drain_events(&mut self) -> Vec<PuzzleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> PuzzleSnapshot<'_> {
        PuzzleSnapshot {
            state: self.state,
            playing: self.playing,
            grid: &self.grid,
            pieces: &self.pieces,
            challenge: self.challenge.as_ref(),
            revealing: self.reveal.is_some(),
            score: self.score,
            correct_words: self.correct_words,
            drag: self.drag.current(),
        }
    }

    #[cfg(test)]
    fn set_hand(&mut self, pieces: Vec<Piece>) {
        self.pieces = pieces;
        self.challenge = None;
        self.state = PuzzleState::Placing;
    }

    #[cfg(test)]
    fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }
}
