//! Player-facing options, stored as pretty JSON next to the save file.

use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const SETTINGS_FILE: &str = "settings.json";

/// How the shop lists a revealed item the player can no longer afford.
///
/// Historically the game shipped both behaviors; `Sticky` is the current
/// one. Reveal itself is always one-way; this only controls listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingPolicy {
    /// Revealed items stay listed, greyed out when unaffordable.
    #[default]
    Sticky,
    /// Revealed items are hidden again until the balance covers them.
    HideUnaffordable,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub listing_policy: ListingPolicy,
}

/// Config directory for settings and saves, created if needed.
pub fn config_dir() -> io::Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "skirmish").ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
    })?;
    let dir = project_dirs.config_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Loads settings, returning defaults if the file is missing or invalid.
pub fn load() -> Settings {
    let path = match config_dir() {
        Ok(dir) => dir.join(SETTINGS_FILE),
        Err(_) => return Settings::default(),
    };
    match fs::read_to_string(&path) {
        Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
        Err(_) => Settings::default(),
    }
}

/// Saves settings as pretty-printed JSON.
pub fn save(settings: &Settings) -> io::Result<()> {
    let path = config_dir()?.join(SETTINGS_FILE);
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)?;
    Ok(())
}
