//! Browser adapter for Snake: arrow keys steer, ticks run on a fixed interval
//! carved out of animation frames.

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, window};

use crate::frame::{self, FixedStep, Flow};
use crate::storage::LocalStorage;
use crate::surface::canvas_by_id;
use crate::{Phase, entropy_seed};

use super::engine::{Direction, SnakeConfig, SnakeGame};
use super::render::{render, render_overlay};

struct SnakeWeb {
    ctx: CanvasRenderingContext2d,
    game: SnakeGame<LocalStorage>,
    clock: FixedStep,
    looping: bool,
}

thread_local! {
    static SNAKE: RefCell<Option<SnakeWeb>> = const { RefCell::new(None) };
}

pub fn start(canvas_id: &str) -> Result<(), JsValue> {
    if SNAKE.with(|cell| cell.borrow().is_none()) {
        install(canvas_id, SnakeConfig::default())?;
    }
    SNAKE.with(|cell| {
        if let Some(st) = cell.borrow_mut().as_mut() {
            st.game.start();
            st.clock.reset();
        }
    });
    ensure_loop();
    Ok(())
}

pub fn toggle_pause() {
    let resumed = SNAKE.with(|cell| {
        cell.borrow_mut().as_mut().is_some_and(|st| {
            st.game.toggle_pause();
            st.clock.reset();
            st.game.phase() == Phase::Running
        })
    });
    if resumed {
        ensure_loop();
    }
}

pub fn turn(name: &str) -> bool {
    let Some(dir) = Direction::parse(name) else { return false };
    SNAKE.with(|cell| {
        if let Some(st) = cell.borrow_mut().as_mut() {
            st.game.turn(dir);
        }
    });
    true
}

fn ensure_loop() {
    let start = SNAKE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .is_some_and(|st| !std::mem::replace(&mut st.looping, true))
    });
    if start {
        frame::run(|ts| {
            SNAKE.with(|cell| match cell.borrow_mut().as_mut() {
                Some(st) => st.frame(ts),
                None => Flow::Stop,
            })
        });
    }
}

impl SnakeWeb {
    fn frame(&mut self, now: f64) -> Flow {
        for _ in 0..self.clock.advance(now) {
            self.game.tick();
            if self.game.phase() != Phase::Running {
                break;
            }
        }
        render(&self.game, &mut self.ctx);
        render_overlay(&self.game, &mut self.ctx);
        self.update_hud();

        if self.game.phase() == Phase::Running {
            Flow::Continue
        } else {
            self.looping = false;
            Flow::Stop
        }
    }

    fn update_hud(&self) {
        let Some(doc) = window().and_then(|w| w.document()) else { return };
        if let Some(el) = doc.get_element_by_id("scoreDisplay") {
            el.set_text_content(Some(&format!("Apples: {}", self.game.score())));
        }
        if let Some(el) = doc.get_element_by_id("highScoreDisplay") {
            el.set_text_content(Some(&self.game.high_score().to_string()));
        }
    }
}

fn install(canvas_id: &str, config: SnakeConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = canvas_by_id(&doc, canvas_id, config.width_px() as u32)?;
    canvas.set_height(config.height_px() as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let clock = FixedStep::new(config.tick_ms);
    let game = SnakeGame::new(config, LocalStorage, entropy_seed());
    SNAKE.with(|cell| {
        *cell.borrow_mut() = Some(SnakeWeb { ctx, game, clock, looping: false });
    });
    listen_keys(&doc)
}

fn listen_keys(doc: &Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        let Some(dir) = Direction::parse(&evt.code()) else { return };
        SNAKE.with(|cell| {
            if let Some(st) = cell.borrow_mut().as_mut() {
                if st.game.phase() == Phase::Running {
                    evt.prevent_default();
                    st.game.turn(dir);
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
