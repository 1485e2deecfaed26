//! Duck Rescue: steer the mother swan, collect lost ducklings, lead the line
//! home to the nest while a pike and a crocodile cross the pond.
//!
//! The engine (`engine`, `input`, `config`, `render`) is plain Rust and runs
//! natively in tests; `web` wires it to a canvas and DOM events.

mod config;
mod engine;
mod input;
mod render;
pub(crate) mod web;

pub use config::{ControlScheme, HazardConfig, RescueConfig};
pub use engine::{Agent, Facing, Hazard, RescueEvent, RescueGame};
pub use input::{InputSnapshot, InputState, Joystick};
pub use render::{bob_offset, render, render_joystick, render_overlay};
