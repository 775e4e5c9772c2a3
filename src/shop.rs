//! Purchase engine and progressive-unlock policy.
//!
//! Invalid actions (unknown id, already owned, can't afford) are silent
//! no-ops; the outcome enum exists for callers and tests, not as an error
//! path. All persistent effects write through the store at the
//! point of mutation.

use crate::catalog::{self, RevealRule};
use crate::constants::SHOP_UNLOCK_THRESHOLD;
use crate::derived_stats::DerivedStats;
use crate::game_state::GameState;
use crate::settings::ListingPolicy;
use crate::store::{self, keys, KvStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased,
    UnknownItem,
    AlreadyOwned,
    /// Retired items never come back; buying one is ignored.
    Retired,
    InsufficientFunds,
}

/// Attempts to buy `id` at `now` (unix seconds).
///
/// On success: deducts the price, marks the item owned and revealed, retires
/// any other owned item in the same category (one item per category), and
/// re-evaluates gates and derived values. Preconditions that fail change
/// nothing.
pub fn buy_item(
    state: &mut GameState,
    store: &mut impl KvStore,
    id: &str,
    now: i64,
) -> PurchaseOutcome {
    let index = match catalog::index_of(id) {
        Some(index) => index,
        None => return PurchaseOutcome::UnknownItem,
    };
    let def = &catalog::CATALOG[index];

    if state.items[index].owned {
        return PurchaseOutcome::AlreadyOwned;
    }
    if state.items[index].retired {
        return PurchaseOutcome::Retired;
    }
    if !state.spend_coins(store, def.price) {
        return PurchaseOutcome::InsufficientFunds;
    }

    // Equip exclusivity: displace and retire any owned category rival.
    for (other_index, other_def) in catalog::CATALOG.iter().enumerate() {
        if other_index != index
            && other_def.category == def.category
            && state.items[other_index].owned
        {
            state.items[other_index].owned = false;
            state.items[other_index].retired = true;
            state.persist_item(store, other_index);
            state.add_log(format!("{} set aside for good.", other_def.name), false);
        }
    }

    state.items[index].owned = true;
    state.items[index].purchased_at = now;
    state.items[index].revealed = true;
    state.persist_item(store, index);

    refresh_unlocks(state, store);
    refresh_reveals(state, store);

    // Derived values must reflect the new gear before the next fight starts.
    let stats = DerivedStats::calculate(state);
    state.add_log(
        format!(
            "Bought {} for {} coins. Next fight: {:.1}s",
            def.name,
            def.price,
            stats.fight_duration_ms as f64 / 1000.0
        ),
        true,
    );

    PurchaseOutcome::Purchased
}

/// Raises the two monotonic section gates when their conditions are met.
/// Gates never go back down.
pub fn refresh_unlocks(state: &mut GameState, store: &mut impl KvStore) {
    if !state.unlocks.shop && state.coins >= SHOP_UNLOCK_THRESHOLD {
        state.unlocks.shop = true;
        store::write_bool(store, keys::SHOP_UNLOCKED, true);
        state.add_log("The shop has opened its doors.", true);
    }
    if !state.unlocks.inventory && state.any_item_owned() {
        state.unlocks.inventory = true;
        store::write_bool(store, keys::INVENTORY_UNLOCKED, true);
        state.add_log("Inventory unlocked.", true);
    }
}

/// Flips the one-way revealed flag on items whose rule has fired. Checked
/// after every balance change and purchase, so "has ever reached the price"
/// falls out of the flag being one-way.
pub fn refresh_reveals(state: &mut GameState, store: &mut impl KvStore) {
    for (index, def) in catalog::CATALOG.iter().enumerate() {
        let item = &state.items[index];
        if item.revealed || item.retired {
            continue;
        }
        let fired = match def.reveal {
            RevealRule::Always => true,
            RevealRule::Affordable => state.coins >= def.price,
            RevealRule::OwnedPrereq(prereq) => state.is_owned(prereq),
        };
        if fired {
            state.items[index].revealed = true;
            store::write_bool(store, &keys::item_revealed(def.id), true);
            state.add_log(format!("New in the shop: {}", def.name), false);
        }
    }
}

/// Whether the shop lists the item at `index` right now.
pub fn is_listed(state: &GameState, index: usize, policy: ListingPolicy) -> bool {
    let item = &state.items[index];
    if item.owned || item.retired || !item.revealed {
        return false;
    }
    match policy {
        ListingPolicy::Sticky => true,
        ListingPolicy::HideUnaffordable => state.coins >= catalog::CATALOG[index].price,
    }
}
