//! `wasm-bindgen` surface: one class per game, backed by `localStorage`.
//!
//! Snapshots and events cross the boundary as JSON strings. Each class runs
//! its own animation-frame loop while the game needs ticks, and drops it on
//! completion, reset or when JS frees the object.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::config::GameConfig;
use crate::effects::Celebration;
use crate::matching::{MatchEvent, MatchingEngine};
use crate::puzzle::{AnswerOutcome, BoardRect, Color, Point, PuzzleEngine, PuzzleEvent};
use crate::storage::LocalStorageRepository;

mod frame;

use frame::FrameLoop;

pub(crate) fn performance_now() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn load_config(config_json: Option<String>) -> Result<GameConfig, JsValue> {
    match config_json {
        Some(raw) => Ok(GameConfig::from_json(&raw)?),
        None => Ok(GameConfig::default()),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[derive(Serialize)]
struct Notification<E> {
    event: E,
    celebration: Option<Celebration>,
}

/// Burst centered on the anchor element if it is on the page, else mid-viewport.
fn celebration_at(particles: u32, anchor_id: Option<&str>) -> Celebration {
    let placed = (|| {
        let win = window()?;
        let el = win.document()?.get_element_by_id(anchor_id?)?;
        let rect = el.get_bounding_client_rect();
        let vw = win.inner_width().ok()?.as_f64()?;
        let vh = win.inner_height().ok()?.as_f64()?;
        Some(Celebration::at(
            particles,
            rect.left() + rect.width() / 2.0,
            rect.top() + rect.height() / 2.0,
            vw,
            vh,
        ))
    })();
    placed.unwrap_or_else(|| Celebration::centered(particles))
}

fn notifications<E: Serialize>(
    events: Vec<E>,
    particles: impl Fn(&E) -> Option<u32>,
    anchor_id: Option<&str>,
) -> Result<String, JsValue> {
    let out: Vec<_> = events
        .into_iter()
        .map(|event| Notification {
            celebration: particles(&event).map(|n| celebration_at(n, anchor_id)),
            event,
        })
        .collect();
    to_json(&out)
}

/// Tick `engine` every frame while `step` reports it still needs ticks.
fn drive<T: 'static>(
    engine: &Rc<RefCell<T>>,
    step: fn(&mut T, f64) -> bool,
) -> Result<FrameLoop, JsValue> {
    let engine = engine.clone();
    FrameLoop::start(move |ts| step(&mut engine.borrow_mut(), ts))
}

/// Display name for a language code, e.g. `"vietnamese"` -> `"Vietnamese"`.
#[wasm_bindgen]
pub fn language_label(code: &str) -> String {
    crate::vocab::language_label(code).to_string()
}

/// JSON object mapping each snapshot color name to its CSS value.
#[wasm_bindgen]
pub fn palette() -> Result<String, JsValue> {
    to_json(&Color::palette())
}

type WebMatching = MatchingEngine<LocalStorageRepository, StdRng>;
type WebPuzzle = PuzzleEngine<LocalStorageRepository, StdRng>;

#[wasm_bindgen]
pub struct MatchingGame {
    engine: Rc<RefCell<WebMatching>>,
    frames: Option<FrameLoop>,
    anchor_id: Option<String>,
}

#[wasm_bindgen]
impl MatchingGame {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<MatchingGame, JsValue> {
        let config = load_config(config_json)?;
        let repo = LocalStorageRepository::new(config.storage_key);
        let engine = MatchingEngine::new(repo, StdRng::from_entropy(), config.matching);
        Ok(Self {
            engine: Rc::new(RefCell::new(engine)),
            frames: None,
            anchor_id: None,
        })
    }

    /// Element whose center anchors the celebration burst.
    pub fn set_anchor(&mut self, element_id: Option<String>) {
        self.anchor_id = element_id;
    }

    pub fn start(&mut self, set_id: Option<String>) -> Result<(), JsValue> {
        self.engine
            .borrow_mut()
            .start(set_id.as_deref(), performance_now())?;
        self.frames = None;
        self.frames = Some(drive(&self.engine, |e, ts| {
            e.tick(ts);
            e.is_active()
        })?);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.frames = None;
        self.engine.borrow_mut().reset();
    }

    pub fn select_card(&mut self, card_id: &str) -> bool {
        self.engine
            .borrow_mut()
            .select_card(card_id, performance_now())
    }

    /// Manual tick for hosts that drive their own clock.
    pub fn tick(&mut self, now_ms: f64) {
        self.engine.borrow_mut().tick(now_ms);
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        to_json(&self.engine.borrow().snapshot())
    }

    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        let events = self.engine.borrow_mut().drain_events();
        notifications(events, MatchEvent::celebration, self.anchor_id.as_deref())
    }

    pub fn is_ticking(&self) -> bool {
        self.frames.as_ref().is_some_and(FrameLoop::is_running)
    }
}

#[wasm_bindgen]
pub struct PuzzleGame {
    engine: Rc<RefCell<WebPuzzle>>,
    frames: Option<FrameLoop>,
    anchor_id: Option<String>,
}

#[wasm_bindgen]
impl PuzzleGame {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<PuzzleGame, JsValue> {
        let config = load_config(config_json)?;
        let repo = LocalStorageRepository::new(config.storage_key);
        let engine = PuzzleEngine::new(repo, StdRng::from_entropy(), config.puzzle);
        Ok(Self {
            engine: Rc::new(RefCell::new(engine)),
            frames: None,
            anchor_id: None,
        })
    }

    pub fn set_anchor(&mut self, element_id: Option<String>) {
        self.anchor_id = element_id;
    }

    pub fn start(&mut self, set_id: Option<String>) -> Result<(), JsValue> {
        self.frames = None;
        self.engine.borrow_mut().start(set_id.as_deref())?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.frames = None;
        self.engine.borrow_mut().reset();
    }

    /// Returns `"correct"`, `"wrong"`, `"revealed"` or `"ignored"`.
    pub fn submit_answer(&mut self, answer: &str) -> String {
        let outcome = self
            .engine
            .borrow_mut()
            .check_answer(answer, performance_now());
        if outcome == AnswerOutcome::Revealed {
            self.watch_reveal();
        }
        match outcome {
            AnswerOutcome::Correct => "correct",
            AnswerOutcome::Wrong { .. } => "wrong",
            AnswerOutcome::Revealed => "revealed",
            AnswerOutcome::Ignored => "ignored",
        }
        .to_string()
    }

    pub fn skip(&mut self) -> bool {
        self.engine.borrow_mut().skip()
    }

    pub fn can_place(&self, piece_index: usize, row: usize, col: usize) -> bool {
        self.engine.borrow().can_place(piece_index, row, col)
    }

    pub fn place(&mut self, piece_index: usize, row: usize, col: usize) -> bool {
        self.engine.borrow_mut().place(piece_index, row, col)
    }

    pub fn begin_drag(&mut self, piece_index: usize, x: f64, y: f64) -> bool {
        self.engine
            .borrow_mut()
            .begin_drag(piece_index, Point::new(x, y))
    }

    /// Pointer moved; `left/top/width/height` are the board's client rect.
    pub fn drag_to(&mut self, x: f64, y: f64, left: f64, top: f64, width: f64, height: f64) {
        let board = BoardRect::new(left, top, width, height);
        self.engine.borrow_mut().drag_to(Point::new(x, y), &board);
    }

    pub fn end_drag(&mut self) -> bool {
        self.engine.borrow_mut().end_drag()
    }

    pub fn tick(&mut self, now_ms: f64) {
        self.engine.borrow_mut().tick(now_ms);
    }

    pub fn snapshot(&self) -> Result<String, JsValue> {
        to_json(&self.engine.borrow().snapshot())
    }

    pub fn drain_events(&mut self) -> Result<String, JsValue> {
        let events = self.engine.borrow_mut().drain_events();
        notifications(events, PuzzleEvent::celebration, self.anchor_id.as_deref())
    }

    pub fn is_ticking(&self) -> bool {
        self.frames.as_ref().is_some_and(FrameLoop::is_running)
    }
}

impl PuzzleGame {
    // Only a pending reveal needs ticks; the loop ends once it fires or is skipped.
    fn watch_reveal(&mut self) {
        self.frames = None;
        match drive(&self.engine, |e, ts| {
            e.tick(ts);
            e.is_revealing()
        }) {
            Ok(frames) => self.frames = Some(frames),
            Err(e) => log::warn!("cannot schedule reveal frames: {e:?}"),
        }
    }
}
