//! Kurs configuration file handling

use anyhow::{Context, Result};
use kurs_catalog::{BannerLocal, DEFAULT_STORAGE_KEY};
use kurs_expandable::PanelConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "kurs.toml";

/// Top-level configuration (kurs.toml)
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct KursConfig {
    /// `[panel]`, `[card]` and `[content]`
    #[serde(flatten)]
    pub panels: PanelConfig,
    #[serde(default)]
    pub banner: BannerConfig,
    #[serde(default)]
    pub cart: CartConfig,
}

/// Banner dismiss flag storage
#[derive(Debug, Deserialize, Serialize)]
pub struct BannerConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default)]
    pub expires_days: Option<u32>,
    #[serde(default = "default_true")]
    pub default_visible: bool,
    /// JSON file holding the dismiss records
    #[serde(default = "default_store")]
    pub store: PathBuf,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_true() -> bool {
    true
}

fn default_store() -> PathBuf {
    PathBuf::from(".kurs/banner.json")
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            expires_days: None,
            default_visible: true,
            store: default_store(),
        }
    }
}

impl BannerConfig {
    pub fn banner(&self) -> BannerLocal {
        BannerLocal {
            storage_key: self.storage_key.clone(),
            expires_days: self.expires_days,
            default_visible: self.default_visible,
        }
    }
}

/// Checkout settings
#[derive(Debug, Deserialize, Serialize)]
pub struct CartConfig {
    /// Simulated payment time in milliseconds
    #[serde(default = "default_confirm_delay")]
    pub confirm_delay: u64,
}

fn default_confirm_delay() -> u64 {
    1500
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            confirm_delay: default_confirm_delay(),
        }
    }
}

impl KursConfig {
    /// Load from `path`, or from `kurs.toml` in the working directory. A
    /// missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if !config_path.exists() {
            if path.is_some() {
                tracing::warn!("config file {} not found, using defaults", config_path.display());
            } else {
                tracing::debug!("no {DEFAULT_CONFIG_FILE}, using defaults");
            }
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
