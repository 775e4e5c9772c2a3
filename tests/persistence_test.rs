//! Integration test: state survives a save/reload cycle.
//!
//! Plays a short session against the disk-backed store, flushes, then
//! reopens the file as a second process would and checks that every
//! persistent field comes back, and that transient ones don't.

use std::fs;
use std::path::PathBuf;

use rand::rngs::mock::StepRng;
use skirmish::catalog;
use skirmish::fight::{fight_tick, start_fight};
use skirmish::game_state::GameState;
use skirmish::save_manager::SaveManager;
use skirmish::shop::{buy_item, refresh_reveals, refresh_unlocks};
use skirmish::store::{keys, KvStore, MemoryStore};

fn temp_save_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("skirmish_it_{name}_{}.dat", std::process::id()))
}

#[test]
fn test_session_roundtrips_through_the_save_file() {
    let path = temp_save_path("session");
    let mut save = SaveManager::at_path(path.clone());
    let mut state = GameState::load(&mut save);
    let profile_id = state.profile_id.clone();

    // A few bare fights, then gear up.
    let mut rng = StepRng::new(u64::MAX, 0);
    let mut clock_ms = 0;
    for _ in 0..6 {
        start_fight(&mut state, clock_ms);
        clock_ms += 4_000;
        fight_tick(&mut state, &mut save, &mut rng, clock_ms);
    }
    buy_item(&mut state, &mut save, "rusty_sword", 1_700_000_000);

    // Leave a fight running when we save: sessions are transient.
    start_fight(&mut state, clock_ms);
    save.flush().expect("flush should succeed");

    let mut reopened = SaveManager::at_path(path.clone());
    let restored = GameState::load(&mut reopened);

    assert_eq!(restored.profile_id, profile_id);
    assert_eq!(restored.coins, 1); // 6 fights - 5 for the sword
    assert_eq!(restored.total_fights, 6);
    assert_eq!(restored.lifetime_coins, 6);
    assert!(restored.unlocks.shop);
    assert!(restored.unlocks.inventory);
    assert!(restored.is_owned("rusty_sword"));
    let sword = restored.items[catalog::index_of("rusty_sword").unwrap()];
    assert_eq!(sword.purchased_at, 1_700_000_000);
    assert!(restored.active_fight.is_none(), "sessions are not saved");
    assert!(restored.log.is_empty(), "the log is not saved");

    fs::remove_file(path).ok();
}

#[test]
fn test_retirement_and_reveals_survive_reload() {
    let path = temp_save_path("retire");
    let mut save = SaveManager::at_path(path.clone());
    let mut state = GameState::load(&mut save);

    state.grant_coins(&mut save, 100);
    refresh_unlocks(&mut state, &mut save);
    refresh_reveals(&mut state, &mut save);
    buy_item(&mut state, &mut save, "rusty_sword", 0);
    buy_item(&mut state, &mut save, "steel_sword", 0);
    save.flush().unwrap();

    let mut reopened = SaveManager::at_path(path.clone());
    let restored = GameState::load(&mut reopened);

    let rusty = restored.items[catalog::index_of("rusty_sword").unwrap()];
    assert!(rusty.retired && !rusty.owned);
    // Revealed by affordability before the spending spree; stays revealed.
    assert!(restored.items[catalog::index_of("clover").unwrap()].revealed);
    // Revealed by owning its prerequisite.
    assert!(restored.items[catalog::index_of("obsidian_blade").unwrap()].revealed);

    fs::remove_file(path).ok();
}

#[test]
fn test_garbage_values_in_the_store_load_as_defaults() {
    let mut store = MemoryStore::new();
    store.set(keys::COINS, "a million");
    store.set(keys::SHOP_UNLOCKED, "1"); // only "true" counts
    store.set(&keys::item_owned("clover"), "TRUE");
    store.set(&keys::item_purchased_at("clover"), "yesterday");

    let state = GameState::load(&mut store);
    assert_eq!(state.coins, 0);
    assert!(!state.unlocks.shop);
    assert!(!state.is_owned("clover"));
    assert_eq!(
        state.items[catalog::index_of("clover").unwrap()].purchased_at,
        0
    );
}

#[test]
fn test_unknown_item_keys_in_an_old_save_are_ignored() {
    let path = temp_save_path("unknown");
    let mut save = SaveManager::at_path(path.clone());
    // A save from a build whose catalog had an item we no longer ship.
    save.set("item.flaming_axe.owned", "true");
    save.set(keys::COINS, "12");
    save.flush().unwrap();

    let mut reopened = SaveManager::at_path(path.clone());
    let state = GameState::load(&mut reopened);
    assert_eq!(state.coins, 12);
    assert!(!state.any_item_owned());

    fs::remove_file(path).ok();
}
