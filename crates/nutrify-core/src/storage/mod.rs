mod config;
mod database;

pub use config::{Config, SleepConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::StorageError;

/// The persistence port: synchronous, durable key/value storage scoped to
/// the installation.
///
/// Trackers treat writes as fire-and-forget -- the in-memory state is
/// authoritative for the session and a failed write only loses that single
/// mutation.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a group of keys atomically: either every entry lands or none
    /// does.
    fn put_many(&self, entries: &[(&str, String)]) -> Result<(), StorageError>;
}

/// Returns `~/.config/nutrify[-dev]/` based on NUTRIFY_ENV.
///
/// Set NUTRIFY_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("NUTRIFY_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("nutrify-dev")
    } else {
        base_dir.join("nutrify")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::DataDir(e.to_string()))?;
    Ok(dir)
}
