//! Game state: coin balance, per-item ownership, unlock gates, and the
//! active fight session.
//!
//! The state is owned exclusively by the game loop and mutated only through
//! the operations in `shop` and `fight`. Every persistent field is written
//! through the [`KvStore`] seam at the point of mutation; transient fields
//! (active fight, message log) never touch the store.

use std::collections::VecDeque;

use uuid::Uuid;

use crate::catalog::{self, ItemDef};
use crate::constants::MESSAGE_LOG_CAPACITY;
use crate::store::{self, keys, KvStore};

/// Mutable per-item state, index-aligned with `catalog::CATALOG`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemState {
    pub owned: bool,
    /// Unix seconds of the most recent purchase, 0 if never bought.
    pub purchased_at: i64,
    /// One-way shop visibility flag.
    pub revealed: bool,
    /// One-way flag: displaced by a same-category purchase, never listed again.
    pub retired: bool,
}

/// Monotonic section gates. Once true, never revert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnlockFlags {
    pub shop: bool,
    pub inventory: bool,
}

/// The single in-flight timed fight. Created on start, dropped on
/// completion; duration is fixed at start and never re-derived mid-fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FightSession {
    pub started_at_ms: i64,
    pub duration_ms: u64,
}

impl FightSession {
    /// Progress ratio in [0, 1].
    pub fn progress(&self, now_ms: i64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = (now_ms - self.started_at_ms).max(0) as f64;
        (elapsed / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self, now_ms: i64) -> bool {
        now_ms - self.started_at_ms >= self.duration_ms as i64
    }
}

/// One line in the in-game message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full game state.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Stable id generated on first run, kept across saves.
    pub profile_id: String,
    pub coins: u64,
    /// Per-item state, index-aligned with `catalog::CATALOG`.
    pub items: Vec<ItemState>,
    pub unlocks: UnlockFlags,
    /// Transient: at most one fight at a time, never persisted.
    pub active_fight: Option<FightSession>,
    /// Transient message log, newest at the back.
    pub log: VecDeque<LogEntry>,
    pub total_fights: u64,
    pub lifetime_coins: u64,
}

impl GameState {
    /// Fresh state with nothing owned and nothing unlocked.
    pub fn new() -> Self {
        Self {
            profile_id: String::new(),
            coins: 0,
            items: vec![ItemState::default(); catalog::CATALOG.len()],
            unlocks: UnlockFlags::default(),
            active_fight: None,
            log: VecDeque::new(),
            total_fights: 0,
            lifetime_coins: 0,
        }
    }

    /// Loads state from the store. Absent and malformed keys fall back to
    /// defaults, so a missing or partially written save starts a clean game
    /// rather than failing. Generates and persists the profile id on first
    /// run.
    pub fn load(store: &mut impl KvStore) -> Self {
        let mut state = Self::new();

        state.profile_id = match store.get(keys::PROFILE_ID) {
            Some(id) if !id.is_empty() => id,
            _ => {
                let id = Uuid::new_v4().to_string();
                store.set(keys::PROFILE_ID, &id);
                id
            }
        };

        state.coins = store::read_u64(store, keys::COINS);
        state.total_fights = store::read_u64(store, keys::TOTAL_FIGHTS);
        state.lifetime_coins = store::read_u64(store, keys::LIFETIME_COINS);
        state.unlocks.shop = store::read_bool(store, keys::SHOP_UNLOCKED);
        state.unlocks.inventory = store::read_bool(store, keys::INVENTORY_UNLOCKED);

        for (index, def) in catalog::CATALOG.iter().enumerate() {
            state.items[index] = ItemState {
                owned: store::read_bool(store, &keys::item_owned(def.id)),
                purchased_at: store::read_i64(store, &keys::item_purchased_at(def.id)),
                revealed: store::read_bool(store, &keys::item_revealed(def.id)),
                retired: store::read_bool(store, &keys::item_retired(def.id)),
            };
        }

        state
    }

    /// Writes the four per-item keys for one catalog index.
    pub fn persist_item(&self, store: &mut impl KvStore, index: usize) {
        let def = &catalog::CATALOG[index];
        let item = &self.items[index];
        store::write_bool(store, &keys::item_owned(def.id), item.owned);
        store::write_i64(store, &keys::item_purchased_at(def.id), item.purchased_at);
        store::write_bool(store, &keys::item_revealed(def.id), item.revealed);
        store::write_bool(store, &keys::item_retired(def.id), item.retired);
    }

    /// Adds coins and persists the balance and lifetime counter.
    pub fn grant_coins(&mut self, store: &mut impl KvStore, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
        self.lifetime_coins = self.lifetime_coins.saturating_add(amount);
        store::write_u64(store, keys::COINS, self.coins);
        store::write_u64(store, keys::LIFETIME_COINS, self.lifetime_coins);
    }

    /// Deducts coins if the balance covers it. Returns false (and changes
    /// nothing) otherwise; the balance can never go negative.
    pub fn spend_coins(&mut self, store: &mut impl KvStore, amount: u64) -> bool {
        if self.coins < amount {
            return false;
        }
        self.coins -= amount;
        store::write_u64(store, keys::COINS, self.coins);
        true
    }

    pub fn is_owned(&self, id: &str) -> bool {
        catalog::index_of(id)
            .map(|index| self.items[index].owned)
            .unwrap_or(false)
    }

    /// Owned items with their definitions, in catalog order.
    pub fn owned_items(&self) -> impl Iterator<Item = (&'static ItemDef, &ItemState)> {
        catalog::CATALOG
            .iter()
            .zip(self.items.iter())
            .filter(|(_, item)| item.owned)
    }

    pub fn any_item_owned(&self) -> bool {
        self.items.iter().any(|item| item.owned)
    }

    /// Appends a message-log line, evicting the oldest past the cap.
    pub fn add_log(&mut self, text: impl Into<String>, is_important: bool) {
        if self.log.len() >= MESSAGE_LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(LogEntry {
            text: text.into(),
            is_important,
        });
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_new_state_is_empty() {
        let state = GameState::new();
        assert_eq!(state.coins, 0);
        assert_eq!(state.items.len(), catalog::CATALOG.len());
        assert!(!state.unlocks.shop);
        assert!(!state.unlocks.inventory);
        assert!(state.active_fight.is_none());
        assert!(!state.any_item_owned());
    }

    #[test]
    fn test_load_generates_profile_id_once() {
        let mut store = MemoryStore::new();
        let first = GameState::load(&mut store);
        assert_eq!(first.profile_id.len(), 36);

        let second = GameState::load(&mut store);
        assert_eq!(second.profile_id, first.profile_id);
    }

    #[test]
    fn test_load_reads_persisted_fields() {
        let mut store = MemoryStore::new();
        store.set(keys::COINS, "17");
        store.set(keys::SHOP_UNLOCKED, "true");
        store.set(&keys::item_owned("clover"), "true");
        store.set(&keys::item_purchased_at("clover"), "1700000000");
        store.set(&keys::item_retired("rusty_sword"), "true");

        let state = GameState::load(&mut store);
        assert_eq!(state.coins, 17);
        assert!(state.unlocks.shop);
        assert!(!state.unlocks.inventory);
        assert!(state.is_owned("clover"));
        let clover = state.items[catalog::index_of("clover").unwrap()];
        assert_eq!(clover.purchased_at, 1_700_000_000);
        let sword = state.items[catalog::index_of("rusty_sword").unwrap()];
        assert!(sword.retired && !sword.owned);
    }

    #[test]
    fn test_load_coerces_garbage_balance_to_zero() {
        let mut store = MemoryStore::new();
        store.set(keys::COINS, "NaN coins");
        let state = GameState::load(&mut store);
        assert_eq!(state.coins, 0);
    }

    #[test]
    fn test_persist_item_roundtrip() {
        let mut store = MemoryStore::new();
        let mut state = GameState::new();
        let index = catalog::index_of("steel_sword").unwrap();
        state.items[index] = ItemState {
            owned: true,
            purchased_at: 123,
            revealed: true,
            retired: false,
        };
        state.persist_item(&mut store, index);

        let loaded = GameState::load(&mut store);
        assert_eq!(loaded.items[index], state.items[index]);
    }

    #[test]
    fn test_spend_rejects_overdraft() {
        let mut store = MemoryStore::new();
        let mut state = GameState::new();
        state.grant_coins(&mut store, 3);

        assert!(!state.spend_coins(&mut store, 5));
        assert_eq!(state.coins, 3);
        assert_eq!(store.get(keys::COINS).as_deref(), Some("3"));

        assert!(state.spend_coins(&mut store, 3));
        assert_eq!(state.coins, 0);
        assert_eq!(store.get(keys::COINS).as_deref(), Some("0"));
    }

    #[test]
    fn test_grant_tracks_lifetime_total() {
        let mut store = MemoryStore::new();
        let mut state = GameState::new();
        state.grant_coins(&mut store, 5);
        assert!(state.spend_coins(&mut store, 4));
        state.grant_coins(&mut store, 2);

        assert_eq!(state.coins, 3);
        assert_eq!(state.lifetime_coins, 7);
        assert_eq!(store.get(keys::LIFETIME_COINS).as_deref(), Some("7"));
    }

    #[test]
    fn test_fight_progress_clamps() {
        let session = FightSession {
            started_at_ms: 1_000,
            duration_ms: 2_000,
        };
        assert_eq!(session.progress(500), 0.0);
        assert_eq!(session.progress(1_000), 0.0);
        assert!((session.progress(2_000) - 0.5).abs() < 1e-9);
        assert_eq!(session.progress(3_000), 1.0);
        assert_eq!(session.progress(9_000), 1.0);
        assert!(!session.is_complete(2_999));
        assert!(session.is_complete(3_000));
    }

    #[test]
    fn test_log_caps_at_capacity() {
        let mut state = GameState::new();
        for i in 0..(MESSAGE_LOG_CAPACITY + 10) {
            state.add_log(format!("line {i}"), false);
        }
        assert_eq!(state.log.len(), MESSAGE_LOG_CAPACITY);
        assert_eq!(state.log.back().unwrap().text, "line 59");
        assert_eq!(state.log.front().unwrap().text, "line 10");
    }
}
