//! User settings.
//!
//! Settings live in `settings.json` inside the `portal` folder of the platform config
//! directory. The file is optional and every field in it is too.

use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::{error::Result, time::TickRate};

/// How the window is created and how fast it ticks.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub tick_rate: TickRate,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: "Portal".to_string(),
            tick_rate: TickRate::DEFAULT,
        }
    }
}

/// Everything that can be configured from the settings file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub log_level: LevelFilter,
    /// Run against the headless display instead of opening a real window.
    pub headless: bool,
    /// Stop after this many frames.
    pub frames: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            log_level: LevelFilter::Info,
            headless: false,
            frames: None,
        }
    }
}

impl Settings {
    /// Returns where the settings file is expected, if the platform has a config directory.
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("portal").join("settings.json"))
    }

    /// Loads the settings file, falling back to the defaults when there is none.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads settings from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
