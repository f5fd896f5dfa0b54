use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StoreError;

use super::data_dir;

/// The seven persisted slots and their wire keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    User,
    Tasks,
    Sessions,
    Materials,
    Goals,
    Posts,
    PomodoroCount,
}

impl Slot {
    pub const ALL: [Slot; 7] = [
        Slot::User,
        Slot::Tasks,
        Slot::Sessions,
        Slot::Materials,
        Slot::Goals,
        Slot::Posts,
        Slot::PomodoroCount,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Slot::User => "user",
            Slot::Tasks => "tasks",
            Slot::Sessions => "sessions",
            Slot::Materials => "materials",
            Slot::Goals => "goals",
            Slot::Posts => "posts",
            Slot::PomodoroCount => "pomodoroCount",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Synchronous slot store: one opaque string value per slot.
///
/// `load` distinguishes "absent" from failure; interpreting the payload
/// (and falling back to defaults on malformed data) is the caller's job.
pub trait KeyValueStore: Send + Sync {
    /// Read a slot. `Ok(None)` means the slot has never been written.
    fn load(&self, slot: Slot) -> Result<Option<String>, StoreError>;

    /// Overwrite a slot.
    fn save(&self, slot: Slot, value: &str) -> Result<(), StoreError>;
}

/// Deserialize a slot, treating absent or malformed payloads as default.
///
/// Malformed data is logged and dropped, never fatal.
pub fn load_or_default<T>(store: &dyn KeyValueStore, slot: Slot) -> T
where
    T: DeserializeOwned + Default,
{
    let payload = match store.load(slot) {
        Ok(Some(payload)) => payload,
        Ok(None) => return T::default(),
        Err(err) => {
            warn!(slot = %slot, error = %err, "failed to read slot, using default");
            return T::default();
        }
    };
    match serde_json::from_str(&payload) {
        Ok(value) => value,
        Err(err) => {
            warn!(slot = %slot, error = %err, "malformed slot payload, using default");
            T::default()
        }
    }
}

/// Serialize a value into its slot.
pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    slot: Slot,
    value: &T,
) -> Result<(), StoreError> {
    let payload = serde_json::to_string(value).map_err(|source| StoreError::EncodeFailed {
        slot: slot.key().to_string(),
        source,
    })?;
    store.save(slot, &payload)
}

/// File-per-slot store under [`data_dir`].
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open the store at `~/.config/brainboost/`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be prepared.
    pub fn open() -> Result<Self, StoreError> {
        Ok(Self { dir: data_dir()? })
    }

    /// Open a store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.json", slot.key()))
    }
}

impl KeyValueStore for JsonFileStore {
    fn load(&self, slot: Slot) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path(slot)) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::ReadFailed {
                slot: slot.key().to_string(),
                source,
            }),
        }
    }

    fn save(&self, slot: Slot, value: &str) -> Result<(), StoreError> {
        std::fs::write(self.path(slot), value).map_err(|source| StoreError::WriteFailed {
            slot: slot.key().to_string(),
            source,
        })
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<Slot, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, slot: Slot) -> Result<Option<String>, StoreError> {
        Ok(self
            .slots
            .lock()
            .map(|slots| slots.get(&slot).cloned())
            .unwrap_or_default())
    }

    fn save(&self, slot: Slot, value: &str) -> Result<(), StoreError> {
        if let Ok(mut slots) = self.slots.lock() {
            slots.insert(slot, value.to_string());
        }
        Ok(())
    }
}
