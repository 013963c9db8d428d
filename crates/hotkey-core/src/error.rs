//! Error types for global hotkey registration.

use std::path::PathBuf;
use thiserror::Error;

use crate::hotkey::HotKey;
use crate::os::{AtomId, OsErrorCode};

/// Failures at the OS boundary, surfaced by `register`/`unregister`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotKeyError {
    /// The name table is exhausted or refused the allocation.
    #[error("Failed to allocate an identifier for {hotkey}: {code}")]
    Allocation { hotkey: HotKey, code: OsErrorCode },

    /// The OS refused to bind the combination.
    #[error("Failed to register {hotkey}: {code}")]
    Registration { hotkey: HotKey, code: OsErrorCode },

    /// The OS refused to unbind the combination. The binding is still live.
    #[error("Failed to unregister {hotkey}: {code}")]
    Unregistration { hotkey: HotKey, code: OsErrorCode },

    /// Releasing the identifier back to the name table failed.
    #[error("Failed to release identifier {atom}: {code}")]
    Release { atom: AtomId, code: OsErrorCode },

    /// The registration was torn down and cannot be bound again.
    #[error("Hotkey {0} has been disposed")]
    Disposed(HotKey),
}

impl HotKeyError {
    /// The underlying OS error code, if this failure came from the OS.
    pub fn os_code(&self) -> Option<OsErrorCode> {
        match self {
            Self::Allocation { code, .. }
            | Self::Registration { code, .. }
            | Self::Unregistration { code, .. }
            | Self::Release { code, .. } => Some(*code),
            Self::Disposed(_) => None,
        }
    }
}

/// Hotkey string parse errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Hotkey string is empty")]
    Empty,

    #[error("Empty key name in '{0}'")]
    EmptyToken(String),

    #[error("Unknown key '{0}'")]
    UnknownKey(String),

    #[error("No key in '{0}', only modifiers")]
    MissingKey(String),

    #[error("More than one key in '{0}'")]
    MultipleKeys(String),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error.
    #[error("IO error reading {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    /// TOML parse error.
    #[error("Parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    /// A binding names an invalid hotkey.
    #[error("Invalid hotkey for '{name}': {source}")]
    InvalidHotkey {
        name: String,
        #[source]
        source: ParseError,
    },
}
