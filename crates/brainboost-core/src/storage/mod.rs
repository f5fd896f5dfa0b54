//! Slot-based persistence.
//!
//! State lives in seven named slots, one JSON-serializable value each,
//! read once at startup and written after every mutation. There are no
//! transactions across slots: a failed write leaves the other slots
//! untouched.

mod store;

pub use store::{load_or_default, save_json, JsonFileStore, KeyValueStore, MemoryStore, Slot};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns `~/.config/brainboost[-dev]/` based on BRAINBOOST_ENV.
///
/// Set BRAINBOOST_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("BRAINBOOST_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("brainboost-dev")
    } else {
        base_dir.join("brainboost")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StoreError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
