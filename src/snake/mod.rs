//! Classic grid snake, sharing the frame loop, surface and high-score store
//! with Duck Rescue.

mod engine;
mod render;
pub(crate) mod web;

pub use engine::{Cell, Direction, SnakeConfig, SnakeEvent, SnakeGame};
pub use render::{render, render_overlay};
