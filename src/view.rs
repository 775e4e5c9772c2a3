//! Snapshot of everything the display needs.
//!
//! Built after every state change; the terminal UI renders snapshots and
//! never reaches into `GameState` directly, so the panels stay decoupled
//! from the game logic.

use crate::catalog::{ItemDef, CATALOG};
use crate::constants::BASE_FIGHT_DURATION_MS;
use crate::derived_stats::DerivedStats;
use crate::game_state::{GameState, LogEntry};
use crate::settings::ListingPolicy;
use crate::shop;

#[derive(Debug, Clone, Copy)]
pub struct ShopEntry {
    pub def: &'static ItemDef,
    pub affordable: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct InventoryEntry {
    pub def: &'static ItemDef,
    pub purchased_at: i64,
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub coins: u64,
    pub shop_unlocked: bool,
    pub inventory_unlocked: bool,
    /// Visible, purchasable items in catalog order.
    pub shop: Vec<ShopEntry>,
    /// Owned items in catalog order.
    pub inventory: Vec<InventoryEntry>,
    /// Aggregated effect lines for the inventory panel.
    pub effect_summary: Vec<String>,
    /// Progress ratio of the running fight, None while idle.
    pub fight_progress: Option<f64>,
    pub next_fight_duration_ms: u64,
    pub log: Vec<LogEntry>,
    pub total_fights: u64,
    pub lifetime_coins: u64,
}

/// One-line description of a single item's effects, for shop rows.
pub fn effect_label(def: &ItemDef) -> String {
    let mut parts = Vec::new();
    if let Some(mult) = def.effects.speed_multiplier {
        parts.push(format!("-{:.0}% fight time", (1.0 - mult) * 100.0));
    }
    if let Some(chance) = def.effects.bonus_loot_chance {
        parts.push(format!("+{:.0}% bonus loot", chance * 100.0));
    }
    if let Some(jackpot) = def.effects.jackpot {
        parts.push(format!(
            "{:.0}% jackpot of {}",
            jackpot.chance * 100.0,
            jackpot.payout
        ));
    }
    parts.join(", ")
}

/// Aggregated effect lines across all owned items.
fn summarize_effects(stats: &DerivedStats) -> Vec<String> {
    let mut lines = Vec::new();
    if stats.fight_duration_ms < BASE_FIGHT_DURATION_MS {
        let saved = 1.0 - stats.fight_duration_ms as f64 / BASE_FIGHT_DURATION_MS as f64;
        lines.push(format!("-{:.0}% fight time", saved * 100.0));
    }
    if stats.bonus_loot_chance > 0.0 {
        lines.push(format!("+{:.0}% bonus loot", stats.bonus_loot_chance * 100.0));
    }
    if let Some(jackpot) = stats.jackpot {
        lines.push(format!(
            "{:.0}% jackpot of {}",
            jackpot.chance * 100.0,
            jackpot.payout
        ));
    }
    lines
}

pub fn build_snapshot(state: &GameState, policy: ListingPolicy, now_ms: i64) -> Snapshot {
    let stats = DerivedStats::calculate(state);

    let shop = CATALOG
        .iter()
        .enumerate()
        .filter(|(index, _)| shop::is_listed(state, *index, policy))
        .map(|(_, def)| ShopEntry {
            def,
            affordable: state.coins >= def.price,
        })
        .collect();

    let inventory = state
        .owned_items()
        .map(|(def, item)| InventoryEntry {
            def,
            purchased_at: item.purchased_at,
        })
        .collect();

    Snapshot {
        coins: state.coins,
        shop_unlocked: state.unlocks.shop,
        inventory_unlocked: state.unlocks.inventory,
        shop,
        inventory,
        effect_summary: summarize_effects(&stats),
        fight_progress: state.active_fight.map(|session| session.progress(now_ms)),
        next_fight_duration_ms: stats.fight_duration_ms,
        log: state.log.iter().cloned().collect(),
        total_fights: state.total_fights,
        lifetime_coins: state.lifetime_coins,
    }
}
