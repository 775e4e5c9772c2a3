//! Derived fight values, recomputed from ownership on demand.
//!
//! Never cached: callers recompute after every purchase and at every fight
//! start, so the numbers always reflect the current gear. A running fight
//! keeps the duration it was started with.

use crate::catalog::JackpotEffect;
use crate::constants::BASE_FIGHT_DURATION_MS;
use crate::game_state::GameState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    /// Base duration times the product of owned speed multipliers.
    pub fight_duration_ms: u64,
    /// Sum of owned bonus-loot chances, clamped to 1.0.
    pub bonus_loot_chance: f64,
    /// Jackpot of the first owned item in catalog order that defines one.
    /// First-match, not a sum: the one effect that does not stack.
    pub jackpot: Option<JackpotEffect>,
}

impl DerivedStats {
    pub fn calculate(state: &GameState) -> Self {
        let mut duration = BASE_FIGHT_DURATION_MS as f64;
        let mut bonus_chance = 0.0;
        let mut jackpot = None;

        for (def, _) in state.owned_items() {
            if let Some(mult) = def.effects.speed_multiplier {
                duration *= mult;
            }
            if let Some(chance) = def.effects.bonus_loot_chance {
                bonus_chance += chance;
            }
            if jackpot.is_none() {
                jackpot = def.effects.jackpot;
            }
        }

        Self {
            fight_duration_ms: duration.round() as u64,
            bonus_loot_chance: bonus_chance.min(1.0),
            jackpot,
        }
    }
}
