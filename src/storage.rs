//! High-score persistence.
//!
//! The game never touches browser storage directly; it is handed a
//! [`HighScoreStore`] so the scoring rules can be exercised with [`MemoryStore`].

use web_sys::Storage;

/// Key the high score lives under in `localStorage`.
pub const HIGH_SCORE_KEY: &str = "highestScore";

pub trait HighScoreStore {
    /// Stored high score, 0 when nothing usable is stored.
    fn load(&self) -> u32;
    fn save(&mut self, value: u32);
}

/// Decode a stored value from its leading digits, so `"15.0"` reads as 15.
/// Missing, negative or non-numeric entries read as 0.
pub fn parse_high_score(raw: Option<&str>) -> u32 {
    let Some(s) = raw else { return 0 };
    let s = s.trim_start();
    let s = s.strip_prefix('+').unwrap_or(s);
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse::<u32>().unwrap_or(0)
}

/// In-memory store for tests and storage-less pages.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    writes: usize,
}

impl MemoryStore {
    pub fn with_value(value: u32) -> Self {
        Self { value: Some(value), writes: 0 }
    }

    /// How many times `save` has been called.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, value: u32) {
        self.value = Some(value);
        self.writes += 1;
    }
}

/// `window.localStorage` backed store. Pages without storage (privacy mode,
/// sandboxed iframes) behave as an always-empty store.
pub struct LocalStorageStore {
    storage: Option<Storage>,
    key: String,
}

impl LocalStorageStore {
    pub fn open(key: &str) -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"localStorage unavailable; high score will not persist".into());
        }
        Self { storage, key: key.to_string() }
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u32 {
        let raw = self
            .storage
            .as_ref()
            .and_then(|s| s.get_item(&self.key).ok().flatten());
        parse_high_score(raw.as_deref())
    }

    fn save(&mut self, value: u32) {
        let Some(storage) = self.storage.as_ref() else { return };
        if let Err(err) = storage.set_item(&self.key, &value.to_string()) {
            web_sys::console::error_2(&"failed to persist high score:".into(), &err);
        }
    }
}
