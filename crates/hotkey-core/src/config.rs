//! Configuration types.
//!
//! Bindings are read from `config.toml` in the platform config directory.
//! The file is only ever read; a missing file means the defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::hotkey::HotKey;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shortcuts to bind at startup.
    #[serde(default = "default_bindings")]
    pub hotkeys: Vec<HotkeyBinding>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hotkeys: default_bindings(),
        }
    }
}

/// One named shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    /// Action name, e.g. "toggle".
    pub name: String,

    /// Hotkey string, e.g. "ctrl+f9".
    pub keys: String,

    /// Suppress auto-repeat while held.
    #[serde(default)]
    pub no_repeat: bool,
}

impl HotkeyBinding {
    pub fn new(name: impl Into<String>, keys: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: keys.into(),
            no_repeat: false,
        }
    }

    /// Parse `keys` into a hotkey, applying `no_repeat`.
    pub fn hotkey(&self) -> Result<HotKey, ConfigError> {
        let hotkey: HotKey = self.keys.parse().map_err(|source| ConfigError::InvalidHotkey {
            name: self.name.clone(),
            source,
        })?;
        Ok(if self.no_repeat {
            hotkey.no_repeat()
        } else {
            hotkey
        })
    }
}

fn default_bindings() -> Vec<HotkeyBinding> {
    vec![
        HotkeyBinding::new("toggle", "ctrl+f9"),
        HotkeyBinding::new("quit", "ctrl+shift+q"),
    ]
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hotkeys"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

/// Load configuration from `path`.
///
/// Returns the defaults if the file does not exist.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    toml::from_str(&text).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
