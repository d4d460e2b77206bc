// requestAnimationFrame loop that stops itself and cancels on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Calls `step(timestamp)` once per frame until it returns false or the loop
/// is dropped. Dropping cancels the pending frame, so no tick outlives the game.
pub struct FrameLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut step: impl FnMut(f64) -> bool + 'static) -> Result<Self, JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let f = callback.clone();
        let h = handle.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            h.set(None);
            if !step(ts) {
                return;
            }
            let Some(w) = window() else {
                return;
            };
            if let Some(cb) = f.borrow().as_ref() {
                h.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut(f64)>));

        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        if let Some(cb) = callback.borrow().as_ref() {
            handle.set(Some(win.request_animation_frame(cb.as_ref().unchecked_ref())?));
        }
        Ok(Self { callback, handle })
    }

    pub fn is_running(&self) -> bool {
        self.handle.get().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.handle.take(), window()) {
            let _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's reference cycle back to its own slot.
        self.callback.borrow_mut().take();
    }
}
