//! Application configuration management.
//!
//! Holds the service base URL, the last email used to sign in, and the
//! bootstrap delay. Stored at `~/.config/wastedesk/config.json`. The
//! `WASTEDESK_API_URL` environment variable wins over the stored URL.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::auth::DEFAULT_BOOTSTRAP_DELAY;

/// Application name used for config/data directory paths
const APP_NAME: &str = "wastedesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Service URL used when neither the environment nor the config sets one
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Environment variable overriding the service URL
pub const API_URL_ENV: &str = "WASTEDESK_API_URL";

/// Environment variable pre-filling the login email
pub const EMAIL_ENV: &str = "WASTEDESK_EMAIL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_url: Option<String>,
    pub last_email: Option<String>,
    pub bootstrap_delay_ms: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Service base URL: environment, then config file, then the default.
    pub fn api_url(&self) -> String {
        self.resolve_api_url(std::env::var(API_URL_ENV).ok())
    }

    fn resolve_api_url(&self, from_env: Option<String>) -> String {
        from_env
            .into_iter()
            .chain(self.api_url.clone())
            .map(|url| url.trim().to_string())
            .find(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Email to pre-fill on the login form
    pub fn login_email(&self) -> Option<String> {
        std::env::var(EMAIL_ENV)
            .ok()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| self.last_email.clone())
    }

    pub fn bootstrap_delay(&self) -> Duration {
        self.bootstrap_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_BOOTSTRAP_DELAY)
    }

    /// Directory holding the persisted session
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }
}
