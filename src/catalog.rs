//! Static item catalog.
//!
//! Every purchasable item is compiled in. Items never change at runtime;
//! all mutable per-item state (owned, revealed, retired) lives in
//! [`crate::game_state::GameState`], index-aligned with [`CATALOG`].

/// Equip category. At most one item per category can be owned at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Weapon,
    Clover,
    Charm,
}

impl Category {
    /// Returns the display name for this category.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Weapon => "Weapon",
            Category::Clover => "Clover",
            Category::Charm => "Charm",
        }
    }
}

/// A rare flat payout rolled independently after each fight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JackpotEffect {
    /// Chance per fight, in [0, 1].
    pub chance: f64,
    /// Coins awarded when the roll hits.
    pub payout: u64,
}

/// Passive effects an item contributes while owned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemEffects {
    /// Multiplies fight duration. In (0, 1]: gear never slows fights down.
    pub speed_multiplier: Option<f64>,
    /// Added to the bonus-loot chance, in [0, 1].
    pub bonus_loot_chance: Option<f64>,
    pub jackpot: Option<JackpotEffect>,
}

/// When an item first becomes visible in the shop. Reveal is one-way:
/// once a rule has fired the item stays revealed (see `shop::refresh_reveals`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealRule {
    /// Reveals once the balance has ever reached the item's price.
    Affordable,
    /// Reveals once the named item is owned.
    OwnedPrereq(&'static str),
    /// Visible from the start.
    Always,
}

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct ItemDef {
    pub id: &'static str,
    pub name: &'static str,
    pub price: u64,
    pub description: &'static str,
    pub category: Category,
    pub effects: ItemEffects,
    pub reveal: RevealRule,
}

/// All items, in display and effect-scan order.
pub const CATALOG: &[ItemDef] = &[
    ItemDef {
        id: "rusty_sword",
        name: "Rusty Sword",
        price: 5,
        description: "A chipped old blade. Ends fights a little sooner.",
        category: Category::Weapon,
        effects: ItemEffects {
            speed_multiplier: Some(0.85),
            bonus_loot_chance: None,
            jackpot: None,
        },
        reveal: RevealRule::Affordable,
    },
    ItemDef {
        id: "steel_sword",
        name: "Steel Sword",
        price: 25,
        description: "Holds an edge. Noticeably faster fights.",
        category: Category::Weapon,
        effects: ItemEffects {
            speed_multiplier: Some(0.65),
            bonus_loot_chance: None,
            jackpot: None,
        },
        reveal: RevealRule::OwnedPrereq("rusty_sword"),
    },
    ItemDef {
        id: "obsidian_blade",
        name: "Obsidian Blade",
        price: 120,
        description: "Cuts through anything, including your schedule.",
        category: Category::Weapon,
        effects: ItemEffects {
            speed_multiplier: Some(0.45),
            bonus_loot_chance: None,
            jackpot: None,
        },
        reveal: RevealRule::OwnedPrereq("steel_sword"),
    },
    ItemDef {
        id: "clover",
        name: "Four-Leaf Clover",
        price: 10,
        description: "Sometimes the loot comes up double.",
        category: Category::Clover,
        effects: ItemEffects {
            speed_multiplier: None,
            bonus_loot_chance: Some(0.10),
            jackpot: None,
        },
        reveal: RevealRule::Affordable,
    },
    ItemDef {
        id: "golden_clover",
        name: "Golden Clover",
        price: 60,
        description: "Much luckier, and occasionally a small windfall.",
        category: Category::Clover,
        effects: ItemEffects {
            speed_multiplier: None,
            bonus_loot_chance: Some(0.25),
            jackpot: Some(JackpotEffect {
                chance: 0.01,
                payout: 10,
            }),
        },
        reveal: RevealRule::OwnedPrereq("clover"),
    },
    ItemDef {
        id: "lucky_coin",
        name: "Lucky Coin",
        price: 40,
        description: "A little extra luck, and a long shot at a big payout.",
        category: Category::Charm,
        effects: ItemEffects {
            speed_multiplier: None,
            bonus_loot_chance: Some(0.10),
            jackpot: Some(JackpotEffect {
                chance: 0.02,
                payout: 25,
            }),
        },
        reveal: RevealRule::Always,
    },
];

/// Looks up a catalog entry by id.
pub fn find(id: &str) -> Option<&'static ItemDef> {
    CATALOG.iter().find(|def| def.id == id)
}

/// Catalog index of an item id, if it exists.
pub fn index_of(id: &str) -> Option<usize> {
    CATALOG.iter().position(|def| def.id == id)
}
