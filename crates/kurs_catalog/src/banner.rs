//! Dismiss flag of the site banner
//!
//! Closing the banner stores `{"closedAt": <epoch millis>}` under a key. The
//! banner stays hidden while that record exists, or until it expires when an
//! expiry in days is configured.

use crate::error::Result;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_STORAGE_KEY: &str = "site:banner:closed";

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// String key/value storage for dismiss records
pub trait DismissStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Store that lives for the process
#[derive(Clone, Debug, Default)]
pub struct MemoryDismissStore {
    values: FxHashMap<String, String>,
}

impl MemoryDismissStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DismissStore for MemoryDismissStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One JSON file mapping keys to raw string values. A missing file reads as
/// empty.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<IndexMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(IndexMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, values: &IndexMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(values)?)?;
        Ok(())
    }
}

impl DismissStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value);
        self.save(&values)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut values = self.load()?;
        if values.shift_remove(key).is_some() {
            self.save(&values)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DismissRecord {
    closed_at: u64,
}

/// Banner visibility backed by a [`DismissStore`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BannerLocal {
    pub storage_key: String,
    pub expires_days: Option<u32>,
    pub default_visible: bool,
}

impl Default for BannerLocal {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            expires_days: None,
            default_visible: true,
        }
    }
}

impl BannerLocal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expiry_days(mut self, days: u32) -> Self {
        self.expires_days = Some(days);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    fn read_record<S: DismissStore + ?Sized>(&self, store: &S) -> Option<DismissRecord> {
        let raw = match store.get(&self.storage_key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = %self.storage_key, error = %e, "banner store unreadable");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(key = %self.storage_key, error = %e, "corrupt banner record");
                None
            }
        }
    }

    /// Whether the banner shows at `now_ms`. An expired record is removed.
    pub fn is_visible<S: DismissStore + ?Sized>(&self, store: &mut S, now_ms: u64) -> bool {
        let Some(record) = self.read_record(store) else {
            return self.default_visible;
        };
        let Some(days) = self.expires_days else {
            return false;
        };

        let lifetime = u64::from(days) * MILLIS_PER_DAY;
        if now_ms.saturating_sub(record.closed_at) > lifetime {
            tracing::debug!(key = %self.storage_key, "banner dismissal expired");
            if let Err(e) = store.remove(&self.storage_key) {
                tracing::warn!(key = %self.storage_key, error = %e, "failed to clear banner record");
            }
            return self.default_visible;
        }
        false
    }

    /// Record a dismissal at `now_ms`. Storage failures are logged, not returned.
    pub fn close<S: DismissStore + ?Sized>(&self, store: &mut S, now_ms: u64) {
        let record = DismissRecord { closed_at: now_ms };
        let result = serde_json::to_string(&record)
            .map_err(Into::into)
            .and_then(|value| store.set(&self.storage_key, value));
        if let Err(e) = result {
            tracing::warn!(key = %self.storage_key, error = %e, "failed to store banner dismissal");
        }
    }

    /// Forget any dismissal
    pub fn reset<S: DismissStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        store.remove(&self.storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = MILLIS_PER_DAY;

    #[test]
    fn test_visible_until_closed() {
        let banner = BannerLocal::new();
        let mut store = MemoryDismissStore::new();
        assert!(banner.is_visible(&mut store, 0));

        banner.close(&mut store, 1_000);
        assert_eq!(
            store.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"{"closedAt":1000}"#)
        );
        assert!(!banner.is_visible(&mut store, 1_000 + 365 * DAY));
    }

    #[test]
    fn test_expiry_is_strict() {
        let banner = BannerLocal::new().with_expiry_days(7);
        let mut store = MemoryDismissStore::new();
        banner.close(&mut store, 0);

        assert!(!banner.is_visible(&mut store, 7 * DAY));
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_some());

        assert!(banner.is_visible(&mut store, 7 * DAY + 1));
        assert!(store.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_record_uses_default() {
        let banner = BannerLocal {
            default_visible: false,
            ..BannerLocal::new()
        };
        let mut store = MemoryDismissStore::new();
        store.set(DEFAULT_STORAGE_KEY, "not json".into()).unwrap();
        assert!(!banner.is_visible(&mut store, 0));

        let banner = BannerLocal::new();
        assert!(banner.is_visible(&mut store, 0));
    }

    #[test]
    fn test_reset_shows_again() {
        let banner = BannerLocal::new().with_key("promo");
        let mut store = MemoryDismissStore::new();
        banner.close(&mut store, 10);
        assert!(!banner.is_visible(&mut store, 20));
        banner.reset(&mut store).unwrap();
        assert!(banner.is_visible(&mut store, 20));
    }

    #[test]
    fn test_json_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("banner.json");
        let banner = BannerLocal::new();

        let mut store = JsonFileStore::new(&path);
        assert!(banner.is_visible(&mut store, 0));
        banner.close(&mut store, 42);

        let mut reopened = JsonFileStore::new(&path);
        assert!(!banner.is_visible(&mut reopened, 43));
        banner.reset(&mut reopened).unwrap();
        assert!(banner.is_visible(&mut JsonFileStore::new(&path), 44));
    }

    #[test]
    fn test_unreadable_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banner.json");
        fs::write(&path, "[1, 2").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(store.get(DEFAULT_STORAGE_KEY).is_err());
        assert!(BannerLocal::new().is_visible(&mut store, 0));
    }
}
