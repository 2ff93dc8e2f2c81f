mod config;
pub mod database;

pub use config::{Config, LocationConfig, NotificationsConfig, ShortcutConfig, SosConfig};
pub use database::Database;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;

use crate::error::{DatabaseError, Result};

/// Slot holding the emergency contact list.
pub const CONTACTS_KEY: &str = "EmergencyContacts";
/// Slot holding the incident feed.
pub const FEED_KEY: &str = "CampusNewsFeed";
/// Slot holding the persisted gesture detector between key events.
pub const DETECTOR_KEY: &str = "GestureDetector";

/// A flat string-to-string store scoped to the application.
///
/// Every list is written as one opaque value under one key; there is no
/// partial update.
pub trait KvStore {
    fn kv_get(&self, key: &str) -> Result<Option<String>>;
    fn kv_set(&self, key: &str, value: &str) -> Result<()>;
}

/// A list read from a slot, plus the parse error if the stored value was corrupt.
#[derive(Debug)]
pub struct LoadedList<T> {
    pub items: Vec<T>,
    pub corrupt: Option<serde_json::Error>,
}

/// Read a whole JSON array from `key`.
///
/// A missing slot or a literal `null` yields an empty list. An unparsable
/// value also yields an empty list, with the error reported in `corrupt`;
/// the stored value is left untouched.
pub fn load_list<T, S>(store: &S, key: &str) -> Result<LoadedList<T>>
where
    T: DeserializeOwned,
    S: KvStore + ?Sized,
{
    let Some(raw) = store.kv_get(key)? else {
        return Ok(LoadedList { items: Vec::new(), corrupt: None });
    };

    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(items) => Ok(LoadedList { items: items.unwrap_or_default(), corrupt: None }),
        Err(e) => {
            tracing::error!("Error parsing {key} JSON: {e}");
            Ok(LoadedList { items: Vec::new(), corrupt: Some(e) })
        }
    }
}

/// Serialize the whole list and overwrite `key`.
pub fn save_list<T, S>(store: &S, key: &str, items: &[T]) -> Result<()>
where
    T: Serialize,
    S: KvStore + ?Sized,
{
    let json = serde_json::to_string(items)?;
    store.kv_set(key, &json)
}

/// Returns the data directory, creating it if needed.
///
/// `CAMPUS_SAFETY_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/campus-safety[-dev]/`, with the dev directory selected by
/// `CAMPUS_SAFETY_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("CAMPUS_SAFETY_DATA_DIR") {
        Some(explicit) => PathBuf::from(explicit),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("CAMPUS_SAFETY_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("campus-safety-dev")
            } else {
                base_dir.join("campus-safety")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| DatabaseError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
