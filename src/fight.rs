//! Fight session state machine: Idle → Running → Idle.
//!
//! Starting is guarded (one session at a time); a running fight always
//! proceeds to completion, there is no cancel. Duration is fixed when the
//! fight starts, while award odds are read from the gear owned at
//! completion. The tick loop drives progress sampling; all randomness comes
//! in through the caller's `Rng` so tests can pin the draws.

use rand::Rng;

use crate::constants::{BASE_FIGHT_REWARD, BONUS_LOOT_REWARD};
use crate::derived_stats::DerivedStats;
use crate::game_state::{FightSession, GameState};
use crate::shop;
use crate::store::{self, keys, KvStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started { duration_ms: u64 },
    /// A fight is already running; the request is ignored.
    AlreadyRunning,
}

/// Starts a fight at `now_ms`, deriving its duration from current gear.
pub fn start_fight(state: &mut GameState, now_ms: i64) -> StartOutcome {
    if state.active_fight.is_some() {
        return StartOutcome::AlreadyRunning;
    }
    let stats = DerivedStats::calculate(state);
    state.active_fight = Some(FightSession {
        started_at_ms: now_ms,
        duration_ms: stats.fight_duration_ms,
    });
    state.add_log(
        format!(
            "A fight begins ({:.1}s)...",
            stats.fight_duration_ms as f64 / 1000.0
        ),
        false,
    );
    StartOutcome::Started {
        duration_ms: stats.fight_duration_ms,
    }
}

/// What one tick observed. `progress` is always valid; the award fields are
/// non-zero only on the completing tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FightTickResult {
    pub completed: bool,
    pub base_award: u64,
    pub bonus_award: u64,
    pub jackpot_award: u64,
    pub progress: f64,
}

impl FightTickResult {
    pub fn total_award(&self) -> u64 {
        self.base_award + self.bonus_award + self.jackpot_award
    }
}

/// Samples the active fight at `now_ms`, completing it once elapsed time
/// reaches the duration. On completion: +1 base coin, an independent
/// bonus-loot roll (+1), and an independent jackpot roll (flat payout).
/// The rolls are independent, so one fight can award all three. Idle ticks are no-ops.
pub fn fight_tick<S: KvStore, R: Rng>(
    state: &mut GameState,
    store: &mut S,
    rng: &mut R,
    now_ms: i64,
) -> FightTickResult {
    let session = match state.active_fight {
        Some(session) => session,
        None => return FightTickResult::default(),
    };

    let mut result = FightTickResult {
        progress: session.progress(now_ms),
        ..FightTickResult::default()
    };
    if !session.is_complete(now_ms) {
        return result;
    }

    state.active_fight = None;
    result.completed = true;
    result.progress = 1.0;

    // Odds come from the gear owned right now, not at fight start.
    let stats = DerivedStats::calculate(state);
    result.base_award = BASE_FIGHT_REWARD;
    if rng.gen::<f64>() < stats.bonus_loot_chance {
        result.bonus_award = BONUS_LOOT_REWARD;
    }
    if let Some(jackpot) = stats.jackpot {
        if rng.gen::<f64>() < jackpot.chance {
            result.jackpot_award = jackpot.payout;
        }
    }

    state.total_fights += 1;
    store::write_u64(store, keys::TOTAL_FIGHTS, state.total_fights);
    state.grant_coins(store, result.total_award());
    shop::refresh_unlocks(state, store);
    shop::refresh_reveals(state, store);

    state.add_log(format!("Fight won! +{} coin", result.base_award), false);
    if result.bonus_award > 0 {
        state.add_log(format!("Bonus loot! +{} coin", result.bonus_award), true);
    }
    if result.jackpot_award > 0 {
        state.add_log(format!("JACKPOT! +{} coins", result.jackpot_award), true);
    }

    result
}
