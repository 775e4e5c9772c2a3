// Tick and timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const INPUT_POLL_MS: u64 = 50;
pub const AUTOSAVE_INTERVAL_SECONDS: u64 = 30;

// Fights
pub const BASE_FIGHT_DURATION_MS: u64 = 3_000;
pub const BASE_FIGHT_REWARD: u64 = 1;
pub const BONUS_LOOT_REWARD: u64 = 1;

// Progression gates
pub const SHOP_UNLOCK_THRESHOLD: u64 = 5;

// Message log
pub const MESSAGE_LOG_CAPACITY: usize = 50;

// Save file: magic prefix of the checksummed key-value snapshot
pub const SAVE_VERSION_MAGIC: u64 = 0x534B_494D_0000_0001;
