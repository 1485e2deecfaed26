//! Browser adapter: canvas, DOM listeners, frame loop and HUD for Duck Rescue.

use std::cell::RefCell;

use log::info;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, window};

use crate::frame::{self, Flow};
use crate::geom::Point;
use crate::storage::LocalStorage;
use crate::surface::canvas_by_id;
use crate::{Phase, entropy_seed};

use super::config::RescueConfig;
use super::engine::{RescueEvent, RescueGame};
use super::input::InputState;
use super::render::{render, render_joystick, render_overlay};

struct RescueWeb {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    game: RescueGame<LocalStorage>,
    input: InputState,
    looping: bool, // a frame is scheduled
}

thread_local! {
    static RESCUE: RefCell<Option<RescueWeb>> = const { RefCell::new(None) };
}

/// Start (or restart) a session on `canvas_id`. `config` replaces the current
/// rules; `None` keeps the ones already installed (defaults on first start).
pub fn start(canvas_id: &str, config: Option<RescueConfig>) -> Result<(), JsValue> {
    let installed = RESCUE.with(|cell| cell.borrow().is_some());
    if !installed {
        install(canvas_id, config.clone().unwrap_or_default())?;
    }
    RESCUE.with(|cell| {
        if let Some(st) = cell.borrow_mut().as_mut() {
            if let Some(config) = config.filter(|_| installed) {
                st.game = RescueGame::new(config, LocalStorage, entropy_seed());
            }
            st.input.clear();
            st.game.start();
            let size = st.game.config().field_size as u32;
            st.canvas.set_width(size);
            st.canvas.set_height(size);
        }
    });
    ensure_loop();
    Ok(())
}

pub fn toggle_pause() {
    let resumed = RESCUE.with(|cell| {
        cell.borrow_mut().as_mut().is_some_and(|st| {
            st.game.toggle_pause();
            st.input.clear();
            info!("[Rescue] phase -> {:?}", st.game.phase());
            st.game.phase() == Phase::Running
        })
    });
    if resumed {
        ensure_loop();
    }
}

fn ensure_loop() {
    let start = RESCUE.with(|cell| {
        cell.borrow_mut()
            .as_mut()
            .is_some_and(|st| !std::mem::replace(&mut st.looping, true))
    });
    if start {
        frame::run(|ts| {
            RESCUE.with(|cell| match cell.borrow_mut().as_mut() {
                Some(st) => st.frame(ts),
                None => Flow::Stop,
            })
        });
    }
}

impl RescueWeb {
    fn frame(&mut self, now: f64) -> Flow {
        let snapshot = self.input.snapshot();
        for event in self.game.tick(&snapshot) {
            if let RescueEvent::LifeLost { .. } = event {
                self.input.clear();
            }
        }

        render(&self.game, &mut self.ctx, now);
        if let Some(stick) = self.input.joystick() {
            render_joystick(&mut self.ctx, &stick);
        }
        render_overlay(&self.game, &mut self.ctx);
        self.update_hud();

        if self.game.phase() == Phase::Running {
            Flow::Continue
        } else {
            self.looping = false;
            Flow::Stop
        }
    }

    /// Mirror read-only values into whichever HUD elements the page provides.
    fn update_hud(&self) {
        let Some(doc) = window().and_then(|w| w.document()) else { return };
        let set_text = |id: &str, text: &str| {
            if let Some(el) = doc.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        };
        set_text("scoreDisplay", &self.game.score().to_string());
        set_text("highScoreDisplay", &self.game.high_score().to_string());
        set_text("deathDisplay", &self.game.casualties().to_string());
        let hearts = self.game.lives().map_or(String::new(), |n| "❤".repeat(n as usize));
        set_text("livesDisplay", &hearts);
        if let Some(bar) = doc
            .get_element_by_id("boostBar")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let pct = self.game.stamina_fraction() * 100.0;
            bar.style().set_property("width", &format!("{pct}%")).ok();
        }
    }
}

// --- Setup -------------------------------------------------------------------

fn install(canvas_id: &str, config: RescueConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let size = config.field_size as u32;
    let canvas = canvas_by_id(&doc, canvas_id, size)?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let game = RescueGame::new(config, LocalStorage, entropy_seed());
    RESCUE.with(|cell| {
        *cell.borrow_mut() = Some(RescueWeb {
            canvas: canvas.clone(),
            ctx,
            game,
            input: InputState::new(),
            looping: false,
        });
    });

    listen_keys(&doc)?;
    listen_touch(&canvas)?;
    listen_mouse(&canvas)?;
    Ok(())
}

/// Client coordinates -> canvas logical coordinates (the canvas may be CSS-scaled).
fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Point {
    let rect = canvas.get_bounding_client_rect();
    let sx = if rect.width() > 0.0 { canvas.width() as f64 / rect.width() } else { 1.0 };
    let sy = if rect.height() > 0.0 { canvas.height() as f64 / rect.height() } else { 1.0 };
    Point::new(
        (client_x as f64 - rect.left()) * sx,
        (client_y as f64 - rect.top()) * sy,
    )
}

fn listen_keys(doc: &Document) -> Result<(), JsValue> {
    for (kind, pressed) in [("keydown", true), ("keyup", false)] {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
            RESCUE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    let code = evt.code();
                    let ours = if pressed {
                        st.input.key_down(&code)
                    } else {
                        st.input.key_up(&code)
                    };
                    // keep arrows / space from scrolling the page mid-game
                    if ours && st.game.phase() == Phase::Running {
                        evt.prevent_default();
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn listen_touch(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    // touchstart / touchmove share the coordinate plumbing
    for kind in ["touchstart", "touchmove"] {
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::TouchEvent| {
            RESCUE.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let Some(st) = borrow.as_mut() else { return };
                if st.game.phase() != Phase::Running {
                    return;
                }
                let Some(touch) = evt.touches().get(0) else { return };
                evt.prevent_default();
                let p = canvas_point(&target, touch.client_x(), touch.client_y());
                if kind == "touchstart" {
                    let now = window()
                        .and_then(|w| w.performance())
                        .map(|perf| perf.now())
                        .unwrap_or(0.0);
                    let agent = st.game.agent().pos;
                    st.input.touch_start(p, now, agent, st.game.config());
                } else {
                    st.input.touch_move(p, st.game.config());
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    let closure = Closure::wrap(Box::new(move |_evt: web_sys::TouchEvent| {
        RESCUE.with(|cell| {
            if let Some(st) = cell.borrow_mut().as_mut() {
                st.input.touch_end(st.game.config());
            }
        });
    }) as Box<dyn FnMut(_)>);
    canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_mouse(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    for kind in ["mousedown", "mousemove"] {
        let target = canvas.clone();
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let p = canvas_point(&target, evt.client_x(), evt.client_y());
            RESCUE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    if kind == "mousedown" {
                        st.input.mouse_down(p, st.game.config());
                    } else {
                        st.input.mouse_move(p);
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    for kind in ["mouseup", "mouseleave"] {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            RESCUE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    st.input.mouse_up();
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}
