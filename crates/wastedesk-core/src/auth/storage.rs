use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::User;

/// Storage file name in the data directory
const STORAGE_FILE: &str = "session.json";

/// Key of the serialized identity entry
pub const USER_KEY: &str = "wastedesk:auth_user";

/// Key of the raw bearer token entry
pub const TOKEN_KEY: &str = "wastedesk:auth_token";

/// Every entry is scoped to the root path
const ROOT_PATH: &str = "/";

/// Token entry max-age in days. The identity entry never expires on its own.
const TOKEN_MAX_AGE_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    path: String,
    #[serde(default)]
    expires_at: Option<DateTime<Utc>>,
}

impl StoredEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|at| now >= at).unwrap_or(false)
    }
}

/// Raw persisted values, before any parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedSession {
    pub user: Option<String>,
    pub token: Option<String>,
}

impl PersistedSession {
    pub fn is_complete(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

/// Key-value store holding the persisted session entries on disk.
pub struct SessionStorage {
    dir: PathBuf,
}

impl SessionStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn storage_path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, StoredEntry>> {
        let path = self.storage_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = std::fs::read_to_string(&path).context("Failed to read session storage")?;
        serde_json::from_str(&contents).context("Failed to parse session storage")
    }

    fn write_entries(&self, entries: &BTreeMap<String, StoredEntry>) -> Result<()> {
        let path = self.storage_path();
        if entries.is_empty() {
            if path.exists() {
                std::fs::remove_file(&path).context("Failed to remove session storage")?;
            }
            return Ok(());
        }
        std::fs::create_dir_all(&self.dir)?;
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(&path, contents).context("Failed to write session storage")?;
        Ok(())
    }

    /// Read one entry. Expired entries read as absent.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Utc::now();
        Ok(self
            .read_entries()?
            .remove(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value))
    }

    pub fn set(&self, key: &str, value: &str, max_age: Option<Duration>) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.to_string(),
                path: ROOT_PATH.to_string(),
                expires_at: max_age.map(|age| Utc::now() + age),
            },
        );
        self.write_entries(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_entries().unwrap_or_default();
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }

    /// Read both session entries
    pub fn load(&self) -> Result<PersistedSession> {
        let now = Utc::now();
        let mut entries = self.read_entries()?;
        let mut take = |key: &str| {
            entries
                .remove(key)
                .filter(|entry| !entry.is_expired(now))
                .map(|entry| entry.value)
        };
        Ok(PersistedSession {
            user: take(USER_KEY),
            token: take(TOKEN_KEY),
        })
    }

    /// Persist identity and token after a successful login
    pub fn persist(&self, user: &User, token: &str) -> Result<()> {
        let user_json = serde_json::to_string(user).context("Failed to serialize identity")?;
        self.set(USER_KEY, &user_json, None)?;
        self.set(TOKEN_KEY, token, Some(Duration::days(TOKEN_MAX_AGE_DAYS)))?;
        debug!(dir = ?self.dir, "Session persisted");
        Ok(())
    }

    /// Replace the identity entry, keeping the token entry as is
    pub fn persist_user(&self, user: &User) -> Result<()> {
        let user_json = serde_json::to_string(user).context("Failed to serialize identity")?;
        self.set(USER_KEY, &user_json, None)
    }

    /// Remove both entries, including a storage file that cannot be parsed
    pub fn clear(&self) -> Result<()> {
        let path = self.storage_path();
        if path.exists() {
            std::fs::remove_file(path).context("Failed to remove session storage")?;
        }
        Ok(())
    }
}
