//! Save slots and the stores that hold them.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::save::Snapshot;
use crate::error::LoadError;

/// A named save slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Auto,
    /// Player-chosen slot, 1 to 3.
    Manual(u8),
    /// Emergency capture written after an internal fault.
    Crash,
}

impl Slot {
    pub const MANUAL: [Slot; 3] = [Slot::Manual(1), Slot::Manual(2), Slot::Manual(3)];

    /// Slots offered when continuing a game, in menu order.
    pub const LOADABLE: [Slot; 5] = [
        Slot::Auto,
        Slot::Manual(1),
        Slot::Manual(2),
        Slot::Manual(3),
        Slot::Crash,
    ];

    pub fn name(&self) -> String {
        match self {
            Slot::Auto => "auto".to_string(),
            Slot::Manual(n) => format!("slot_{}", n),
            Slot::Crash => "crash".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    Empty,
    Occupied {
        zone: String,
        level: u32,
        timestamp: String,
    },
    /// Present but unreadable. Never confused with an empty slot.
    Corrupted,
}

/// Where snapshots are kept.
pub trait SaveStore {
    fn save(&mut self, slot: Slot, snapshot: &Snapshot) -> io::Result<()>;

    fn load(&self, slot: Slot) -> Result<Snapshot, LoadError>;

    fn status(&self, slot: Slot) -> SlotStatus {
        match self.load(slot) {
            Ok(snapshot) => SlotStatus::Occupied {
                zone: snapshot.player.zone,
                level: snapshot.player.level,
                timestamp: snapshot.timestamp,
            },
            Err(LoadError::EmptySlot(_)) => SlotStatus::Empty,
            Err(_) => SlotStatus::Corrupted,
        }
    }
}

/// JSON files on disk, one per slot.
pub struct SaveManager {
    save_dir: PathBuf,
}

impl SaveManager {
    /// Uses `~/.kadath/saves`, creating it if needed.
    pub fn new() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Self::with_dir(home_dir.join(".kadath").join("saves"))
    }

    pub fn with_dir(save_dir: impl Into<PathBuf>) -> io::Result<Self> {
        let save_dir = save_dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn dir(&self) -> &Path {
        &self.save_dir
    }

    fn path(&self, slot: Slot) -> PathBuf {
        self.save_dir.join(format!("{}.json", slot.name()))
    }
}

impl SaveStore for SaveManager {
    fn save(&mut self, slot: Slot, snapshot: &Snapshot) -> io::Result<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(self.path(slot), json)?;
        log::debug!("Saved slot {}", slot.name());
        Ok(())
    }

    fn load(&self, slot: Slot) -> Result<Snapshot, LoadError> {
        let path = self.path(slot);
        if !path.exists() {
            return Err(LoadError::EmptySlot(slot.name()));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Keeps snapshots as JSON text in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: HashMap<Slot, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw text in a slot, valid or not.
    pub fn insert_raw(&mut self, slot: Slot, text: impl Into<String>) {
        self.slots.insert(slot, text.into());
    }

    pub fn raw(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, slot: Slot, snapshot: &Snapshot) -> io::Result<()> {
        let json = serde_json::to_string(snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.slots.insert(slot, json);
        Ok(())
    }

    fn load(&self, slot: Slot) -> Result<Snapshot, LoadError> {
        let json = self
            .slots
            .get(&slot)
            .ok_or_else(|| LoadError::EmptySlot(slot.name()))?;
        Ok(serde_json::from_str(json)?)
    }
}
