//! Application configuration.
//!
//! A single TOML file under the platform config directory holds the backend
//! endpoint and display preferences. A missing file means defaults; a
//! malformed file is reported and replaced by defaults rather than aborting
//! startup.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::models::settings::Settings;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the hosted scheduling backend.
    pub backend_url: String,
    pub settings: Settings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "https://api.salon-agenda.example/v1".to_string(),
            settings: Settings::default(),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "salon-agenda")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the configuration from the default location.
pub fn load() -> AppConfig {
    let Some(path) = config_path() else {
        log::warn!("no config directory available, using default configuration");
        return AppConfig::default();
    };

    match load_from(&path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!(
                "failed to load config from {}: {:#}; using defaults",
                path.display(),
                err
            );
            AppConfig::default()
        }
    }
}

pub fn load_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

pub fn save_to(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }

    let raw = toml::to_string_pretty(config).context("failed to serialize configuration")?;
    fs::write(path, raw)
        .with_context(|| format!("failed to write config file {}", path.display()))
}
