//! Cooperative frame scheduling on top of `requestAnimationFrame`.
//!
//! The next frame is requested only after the current callback has returned, so
//! ticks never overlap. Returning `Flow::Stop` simply stops requesting frames.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Run `on_frame` once per display refresh until it returns `Flow::Stop`.
pub fn run<F>(mut on_frame: F)
where
    F: FnMut(f64) -> Flow + 'static,
{
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        match on_frame(ts) {
            Flow::Continue => request(&f),
            // drop our handle so the closure is freed once it returns
            Flow::Stop => drop(f.borrow_mut().take()),
        }
    }) as Box<dyn FnMut(f64)>));
    request(&g);
}

fn request(cb: &FrameCallback) {
    if let (Some(w), Some(c)) = (window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(c.as_ref().unchecked_ref());
    }
}

/// Converts display-rate timestamps into whole fixed-interval steps.
#[derive(Clone, Debug)]
pub struct FixedStep {
    interval_ms: f64,
    last_ms: Option<f64>,
    acc_ms: f64,
    max_steps: u32, // cap after long stalls (background tab)
}

impl FixedStep {
    pub fn new(interval_ms: f64) -> Self {
        Self { interval_ms, last_ms: None, acc_ms: 0.0, max_steps: 4 }
    }

    /// Forget timing history, e.g. after a pause, so no catch-up burst occurs.
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.acc_ms = 0.0;
    }

    /// Number of steps due at `now_ms`. The first call only primes the clock.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            return 0;
        };
        self.acc_ms += (now_ms - last).max(0.0);
        let mut steps = 0;
        while self.acc_ms >= self.interval_ms && steps < self.max_steps {
            self.acc_ms -= self.interval_ms;
            steps += 1;
        }
        if steps == self.max_steps {
            self.acc_ms = 0.0;
        }
        steps
    }
}
