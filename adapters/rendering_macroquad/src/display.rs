//! Optional TOML display configuration for the macroquad backend.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Window and presentation settings loaded from an optional TOML file.
///
/// Every field has a default, so a partial file only overrides the settings
/// it names. Unknown keys are rejected to catch typos early.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Initial window width in physical pixels.
    pub window_width: i32,
    /// Initial window height in physical pixels.
    pub window_height: i32,
    /// Swap interval requested from the windowing platform, if any.
    pub swap_interval: Option<i32>,
    /// Whether the backend prints a per-second frame-rate report.
    pub show_fps: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            window_width: 960,
            window_height: 960,
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl DisplayConfig {
    /// Loads the configuration from a TOML file at the provided path.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read display config at {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse display config at {}", path.display()))
    }
}
