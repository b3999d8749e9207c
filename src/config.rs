//! Configuration Management
//!
//! Handles persistent configuration storage for mdex.

use crate::store::firebase::DEFAULT_COLLECTION;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable holding the store base URL
pub const BASE_URL_ENV: &str = "MDEX_FIREBASE_URL";
/// Environment variable holding the store auth token
pub const AUTH_TOKEN_ENV: &str = "MDEX_FIREBASE_AUTH";

/// Notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_toast_duration")]
    pub toast_duration_secs: u64,
    #[serde(default = "default_max_history")]
    pub max_history: usize,
}

fn default_toast_duration() -> u64 {
    5
}

fn default_max_history() -> usize {
    50
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            toast_duration_secs: default_toast_duration(),
            max_history: default_max_history(),
        }
    }
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Realtime Database URL, e.g. https://<db>.firebaseio.com
    #[serde(default)]
    pub base_url: Option<String>,
    /// Child location holding the records
    #[serde(default)]
    pub collection: Option<String>,
    /// ID token or database secret sent as `auth`
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mdex").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective base URL (CLI > env > config)
    pub fn effective_base_url(&self, cli: Option<&str>) -> Result<Url> {
        let raw = non_blank(cli.map(str::to_string))
            .or_else(|| non_blank(std::env::var(BASE_URL_ENV).ok()))
            .or_else(|| non_blank(self.base_url.clone()));

        let Some(raw) = raw else {
            bail!(
                "No store URL configured. Set {} or use --base-url",
                BASE_URL_ENV
            );
        };
        parse_base_url(&raw)
    }

    /// Get effective auth token (CLI > env > config)
    pub fn effective_auth_token(&self, cli: Option<&str>) -> Option<String> {
        non_blank(cli.map(str::to_string))
            .or_else(|| non_blank(std::env::var(AUTH_TOKEN_ENV).ok()))
            .or_else(|| non_blank(self.auth_token.clone()))
    }

    pub fn effective_collection(&self) -> String {
        self.collection
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string())
    }

    /// Remember the base URL for next start
    pub fn set_base_url(&mut self, url: &Url) -> Result<()> {
        self.base_url = Some(url.as_str().trim_end_matches('/').to_string());
        self.save()
    }
}

/// An empty flag or variable counts as unset
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Validate a store base URL (http or https, no query)
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid store URL: {}", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Store URL must use http or https: {}", raw);
    }
    if url.query().is_some() {
        bail!("Store URL must not carry a query string: {}", raw);
    }
    Ok(url)
}
