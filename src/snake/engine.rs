//! Grid snake. One `tick` per fixed interval: steer, grow on food, die on walls
//! or on itself.

use std::collections::VecDeque;

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Phase;
use crate::storage::HighScoreStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `KeyboardEvent.code` or a plain name ("up", "LEFT", ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "KeyW" => Some(Direction::Up),
            "ArrowDown" | "KeyS" => Some(Direction::Down),
            "ArrowLeft" | "KeyA" => Some(Direction::Left),
            "ArrowRight" | "KeyD" => Some(Direction::Right),
            _ => match name.to_ascii_lowercase().as_str() {
                "up" => Some(Direction::Up),
                "down" => Some(Direction::Down),
                "left" => Some(Direction::Left),
                "right" => Some(Direction::Right),
                _ => None,
            },
        }
    }
}

/// Grid cell, in cells (not px).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SnakeConfig {
    pub cell_px: f64,
    pub cols: i32,
    pub rows: i32,
    pub food_span: i32, // food cells are drawn from 0..food_span on each axis
    pub tick_ms: f64,
    pub start_head: Cell,
    pub start_len: usize, // body extends to the left of the head
    pub high_score_key: String,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            cell_px: 20.0,
            cols: 30,
            rows: 30,
            food_span: 29,
            tick_ms: 150.0,
            start_head: Cell::new(15, 15),
            start_len: 3,
            high_score_key: "snakeHighScore".into(),
        }
    }
}

impl SnakeConfig {
    pub fn width_px(&self) -> f64 {
        self.cols as f64 * self.cell_px
    }

    pub fn height_px(&self) -> f64 {
        self.rows as f64 * self.cell_px
    }

    fn contains(&self, c: Cell) -> bool {
        (0..self.cols).contains(&c.x) && (0..self.rows).contains(&c.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeEvent {
    Ate { score: u32 },
    GameOver { score: u32 },
    NewHighScore(u32),
}

pub struct SnakeGame<S: HighScoreStore> {
    config: SnakeConfig,
    store: S,
    rng: SmallRng,
    phase: Phase,
    body: VecDeque<Cell>, // head first
    direction: Direction,
    next_direction: Direction,
    food: Cell,
    score: u32,
    high_score: u32,
}

impl<S: HighScoreStore> SnakeGame<S> {
    pub fn new(config: SnakeConfig, store: S, seed: u64) -> Self {
        let high_score = store.load_high_score(&config.high_score_key);
        let mut game = Self {
            body: VecDeque::new(),
            direction: Direction::Right,
            next_direction: Direction::Right,
            food: Cell::new(0, 0),
            score: 0,
            high_score,
            phase: Phase::NotStarted,
            rng: SmallRng::seed_from_u64(seed),
            store,
            config,
        };
        game.reset_body();
        game.spawn_food();
        game
    }

    pub fn start(&mut self) {
        self.score = 0;
        self.direction = Direction::Right;
        self.next_direction = Direction::Right;
        self.reset_body();
        self.spawn_food();
        self.phase = Phase::Running;
        info!("[Snake] session started (high score {})", self.high_score);
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            other => other,
        };
    }

    /// Queue a turn for the next tick. Reversing onto the neck is ignored.
    pub fn turn(&mut self, dir: Direction) {
        if self.phase == Phase::Running && dir != self.direction.opposite() {
            self.next_direction = dir;
        }
    }

    pub fn tick(&mut self) -> Vec<SnakeEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }
        self.direction = self.next_direction;

        let Some(&head) = self.body.front() else {
            return events;
        };
        let (dx, dy) = self.direction.delta();
        let new_head = Cell::new(head.x + dx, head.y + dy);

        if new_head == self.food {
            self.score += 1;
            self.spawn_food();
            events.push(SnakeEvent::Ate { score: self.score });
        } else {
            self.body.pop_back();
        }

        if !self.config.contains(new_head) || self.body.contains(&new_head) {
            self.phase = Phase::Ended;
            if self.score > self.high_score {
                self.high_score = self.score;
                self.store
                    .save_high_score(&self.config.high_score_key, self.high_score);
                events.push(SnakeEvent::NewHighScore(self.high_score));
            }
            info!("[Snake] game over with {} apples", self.score);
            events.push(SnakeEvent::GameOver { score: self.score });
            return events;
        }

        self.body.push_front(new_head);
        events
    }

    fn reset_body(&mut self) {
        let head = self.config.start_head;
        self.body = (0..self.config.start_len as i32)
            .map(|i| Cell::new(head.x - i, head.y))
            .collect();
    }

    fn spawn_food(&mut self) {
        let span = self.config.food_span.max(1);
        self.food = Cell::new(self.rng.gen_range(0..span), self.rng.gen_range(0..span));
    }

    // --- Read-only views -----------------------------------------------------

    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }
}
