//! High score persistence. One integer per game, stored as text under a fixed key.
//!
//! Reads never fail: anything absent or unparseable is treated as 0. Writes are
//! synchronous and fire-and-forget; a failing backend only logs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::warn;
use web_sys::window;

pub trait HighScoreStore {
    /// Raw stored value, if any.
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);

    fn load_high_score(&self, key: &str) -> u32 {
        parse_high_score(self.read(key).as_deref())
    }

    fn save_high_score(&mut self, key: &str, value: u32) {
        self.write(key, &value.to_string());
    }
}

/// Stored text -> score. Accepts surrounding whitespace; negative, fractional or
/// garbage input falls back to zero.
pub fn parse_high_score(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok()).unwrap_or(0)
}

// --- Browser localStorage ----------------------------------------------------

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl HighScoreStore for LocalStorage {
    fn read(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn write(&mut self, key: &str, value: &str) {
        match Self::storage() {
            Some(s) => {
                if s.set_item(key, value).is_err() {
                    warn!("[Storage] failed to persist {key}={value}");
                }
            }
            None => warn!("[Storage] localStorage unavailable, {key} not persisted"),
        }
    }
}

// --- In-memory (tests, headless) ----------------------------------------------

/// Clones share the same map, so a "restart" can be simulated by building a new
/// game from a clone of the store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        store
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }
}
