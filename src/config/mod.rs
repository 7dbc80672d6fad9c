// SPDX-License-Identifier: MPL-2.0
//! This module handles the library's configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use crouton::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Keep banners around longer
//! config.default_duration_ms = Some(4000);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::diagnostics::JournalCapacity;
use crate::domain::notification::{Configuration, DisplayDuration};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Crouton";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_duration_ms: Option<u64>,
    #[serde(default)]
    pub long_duration_ms: Option<u64>,
    #[serde(default)]
    pub announce: Option<bool>,
    #[serde(default)]
    pub journal_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_ms: Some(DEFAULT_DURATION_MS),
            long_duration_ms: Some(DEFAULT_LONG_DURATION_MS),
            announce: Some(DEFAULT_ANNOUNCE),
            journal_capacity: Some(DEFAULT_JOURNAL_CAPACITY),
        }
    }
}

impl Config {
    /// Display duration for regular banners, clamped to the accepted range.
    #[must_use]
    pub fn default_duration(&self) -> DisplayDuration {
        duration_from(self.default_duration_ms, DEFAULT_DURATION_MS)
    }

    /// Display duration for banners that need more reading time.
    #[must_use]
    pub fn long_duration(&self) -> DisplayDuration {
        duration_from(self.long_duration_ms, DEFAULT_LONG_DURATION_MS)
    }

    #[must_use]
    pub fn announce(&self) -> bool {
        self.announce.unwrap_or(DEFAULT_ANNOUNCE)
    }

    /// Journal size, clamped to the accepted range. Out-of-range values
    /// are logged.
    #[must_use]
    pub fn journal_capacity(&self) -> JournalCapacity {
        let requested = self.journal_capacity.unwrap_or(DEFAULT_JOURNAL_CAPACITY);
        let capacity = JournalCapacity::new(requested);
        if capacity.value() != requested {
            let bound = if capacity.is_max() { "maximum" } else { "minimum" };
            tracing::warn!(
                requested,
                used = capacity.value(),
                min = MIN_JOURNAL_CAPACITY,
                max = MAX_JOURNAL_CAPACITY,
                bound,
                "journal capacity out of range"
            );
        }
        capacity
    }

    /// The [`Configuration`] requests start from when they set none.
    #[must_use]
    pub fn configuration(&self) -> Configuration {
        Configuration::default().with_duration(self.default_duration())
    }

    /// Like [`configuration`](Self::configuration), with the long display
    /// duration.
    #[must_use]
    pub fn long_configuration(&self) -> Configuration {
        Configuration::default().with_duration(self.long_duration())
    }
}

fn duration_from(value: Option<u64>, fallback: u64) -> DisplayDuration {
    let millis = value
        .unwrap_or(fallback)
        .clamp(MIN_DURATION_MS, MAX_DURATION_MS);
    DisplayDuration::Finite(Duration::from_millis(millis))
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Loads a configuration file. Invalid TOML falls back to the defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_else(|err| {
        tracing::warn!(path = %path.display(), %err, "invalid settings file, using defaults");
        Config::default()
    }))
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
