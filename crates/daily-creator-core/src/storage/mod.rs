mod config;
pub mod database;
mod memory;

pub use config::{Config, NotificationsConfig, ReminderConfig};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StorageError;

/// Persistent string key-value storage consumed by the streak tracker.
///
/// Implementations must be read-after-write consistent: a `get` following a
/// successful `set` on the same key returns the new value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Returns `~/.config/daily-creator[-dev]/` based on DAILY_CREATOR_ENV.
///
/// Set DAILY_CREATOR_ENV=dev to use development data directory.
/// DAILY_CREATOR_HOME, when set, replaces the whole path.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = match std::env::var_os("DAILY_CREATOR_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("DAILY_CREATOR_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("daily-creator-dev")
            } else {
                base_dir.join("daily-creator")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
