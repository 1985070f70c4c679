// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use dicom_lens::config::{self, Config};
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.window_sensitivity = Some(3.0);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILE: &str = "settings.toml";

/// Multiplier applied to horizontal/vertical drag deltas while windowing.
pub const DEFAULT_WINDOW_SENSITIVITY: f32 = 2.0;

/// Divisor applied to vertical drag deltas while zooming.
pub const DEFAULT_ZOOM_SENSITIVITY: f32 = 100.0;

/// Smallest accepted VOI window width. The DICOM VOI LUT model treats a
/// width below 1 as degenerate.
pub const MIN_WINDOW_WIDTH: f32 = 1.0;

/// Smallest accepted zoom scale. Keeps pan's scale division well-defined.
pub const MIN_SCALE: f32 = 0.01;

/// VOI window applied when a scan carries no WindowWidth/WindowCenter tags.
pub const FALLBACK_WINDOW_WIDTH: f32 = 400.0;
pub const FALLBACK_WINDOW_CENTER: f32 = 40.0;

/// Number of records fetched for the sidebar history list.
pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Drag-to-window sensitivity multiplier.
    #[serde(default)]
    pub window_sensitivity: Option<f32>,
    /// Drag-to-zoom sensitivity divisor.
    #[serde(default)]
    pub zoom_sensitivity: Option<f32>,
    /// Maximum number of history entries fetched from the store.
    #[serde(default)]
    pub history_limit: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_sensitivity: Some(DEFAULT_WINDOW_SENSITIVITY),
            zoom_sensitivity: Some(DEFAULT_ZOOM_SENSITIVITY),
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl Config {
    /// Effective windowing sensitivity, falling back to the default.
    #[must_use]
    pub fn window_sensitivity_or_default(&self) -> f32 {
        self.window_sensitivity
            .filter(|s| *s > 0.0)
            .unwrap_or(DEFAULT_WINDOW_SENSITIVITY)
    }

    /// Effective zoom sensitivity, falling back to the default.
    #[must_use]
    pub fn zoom_sensitivity_or_default(&self) -> f32 {
        self.zoom_sensitivity
            .filter(|s| *s > 0.0)
            .unwrap_or(DEFAULT_ZOOM_SENSITIVITY)
    }

    /// Effective history limit, falling back to the default.
    #[must_use]
    pub fn history_limit_or_default(&self) -> u32 {
        self.history_limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
    }
}

pub fn load() -> Result<Config> {
    if let Some(path) = paths::get_app_config_dir().map(|dir| dir.join(CONFIG_FILE)) {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = paths::get_app_config_dir().map(|dir| dir.join(CONFIG_FILE)) {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
