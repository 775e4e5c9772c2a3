//! Disk-backed key-value store.
//!
//! The whole key map is held in memory (game logic writes through on every
//! mutation) and flushed to a single checksummed file on the autosave
//! cadence and on quit.
//!
//! File format:
//! - Version magic (8 bytes)
//! - Data length (4 bytes)
//! - bincode-serialized key map (variable length)
//! - SHA256 checksum over the three fields above (32 bytes)
//!
//! A missing, truncated, or corrupt file loads as an empty map, so the
//! game starts fresh instead of failing.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::constants::SAVE_VERSION_MAGIC;
use crate::settings;
use crate::store::KvStore;

const SAVE_FILE: &str = "save.dat";

pub struct SaveManager {
    save_path: PathBuf,
    entries: HashMap<String, String>,
    dirty: bool,
}

impl SaveManager {
    /// Opens the save in the platform config directory, loading any valid
    /// existing file.
    pub fn new() -> io::Result<Self> {
        let save_path = settings::config_dir()?.join(SAVE_FILE);
        Ok(Self::at_path(save_path))
    }

    /// Opens a save at an explicit path. Used by tests.
    pub fn at_path(save_path: PathBuf) -> Self {
        let entries = read_entries(&save_path).unwrap_or_default();
        Self {
            save_path,
            entries,
            dirty: false,
        }
    }

    pub fn save_exists(&self) -> bool {
        self.save_path.exists()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the key map to disk if anything changed since the last flush.
    pub fn flush(&mut self) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let data = bincode::serialize(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(SAVE_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        let mut file = fs::File::create(&self.save_path)?;
        file.write_all(&SAVE_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;

        self.dirty = false;
        Ok(())
    }
}

impl KvStore for SaveManager {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.dirty = true;
        }
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.dirty = true;
        }
    }
}

/// Reads and verifies a save file. Any failure (missing file, wrong magic,
/// short read, checksum mismatch, undecodable payload) yields None.
fn read_entries(path: &PathBuf) -> Option<HashMap<String, String>> {
    let mut file = fs::File::open(path).ok()?;

    let mut magic_bytes = [0u8; 8];
    file.read_exact(&mut magic_bytes).ok()?;
    if u64::from_le_bytes(magic_bytes) != SAVE_VERSION_MAGIC {
        return None;
    }

    let mut length_bytes = [0u8; 4];
    file.read_exact(&mut length_bytes).ok()?;
    let data_len = u32::from_le_bytes(length_bytes) as usize;

    let mut data = vec![0u8; data_len];
    file.read_exact(&mut data).ok()?;

    let mut stored_checksum = [0u8; 32];
    file.read_exact(&mut stored_checksum).ok()?;

    let mut hasher = Sha256::new();
    hasher.update(magic_bytes);
    hasher.update(length_bytes);
    hasher.update(&data);
    if stored_checksum != hasher.finalize().as_slice() {
        return None;
    }

    bincode::deserialize(&data).ok()
}
