//! Narrow key-value persistence seam.
//!
//! Game logic only ever talks to a [`KvStore`] (string keys to string
//! values), so every operation is testable against [`MemoryStore`] without
//! touching disk. The disk-backed implementation lives in
//! `save_manager::SaveManager`.
//!
//! Contract: an absent key means the default (0 balance, false flags,
//! 0 timestamp), and a malformed stored value is coerced to that same
//! default rather than surfaced as an error.

use std::collections::HashMap;

pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store used by tests and available as a scratch backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Key schema. Fixed keys are consts; per-item keys are derived from the
/// catalog id so unknown ids in an old save are simply never read.
pub mod keys {
    pub const COINS: &str = "coins";
    pub const SHOP_UNLOCKED: &str = "shop.unlocked";
    pub const INVENTORY_UNLOCKED: &str = "inventory.unlocked";
    pub const PROFILE_ID: &str = "profile.id";
    pub const TOTAL_FIGHTS: &str = "stats.total_fights";
    pub const LIFETIME_COINS: &str = "stats.lifetime_coins";

    pub fn item_owned(id: &str) -> String {
        format!("item.{id}.owned")
    }

    pub fn item_purchased_at(id: &str) -> String {
        format!("item.{id}.purchased_at")
    }

    pub fn item_revealed(id: &str) -> String {
        format!("item.{id}.revealed")
    }

    pub fn item_retired(id: &str) -> String {
        format!("item.{id}.retired")
    }
}

/// Reads a counter, treating absent or non-numeric values as 0.
pub fn read_u64(store: &impl KvStore, key: &str) -> u64 {
    store
        .get(key)
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0)
}

/// Reads a timestamp, treating absent or non-numeric values as 0.
pub fn read_i64(store: &impl KvStore, key: &str) -> i64 {
    store
        .get(key)
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
}

/// Reads a flag. Anything other than the literal "true" is false.
pub fn read_bool(store: &impl KvStore, key: &str) -> bool {
    store.get(key).as_deref() == Some("true")
}

pub fn write_u64(store: &mut impl KvStore, key: &str, value: u64) {
    store.set(key, &value.to_string());
}

pub fn write_i64(store: &mut impl KvStore, key: &str, value: i64) {
    store.set(key, &value.to_string());
}

pub fn write_bool(store: &mut impl KvStore, key: &str, value: bool) {
    store.set(key, if value { "true" } else { "false" });
}
