//! Core types for global hotkey registration.
//!
//! This crate contains the plain data shared by the other crates:
//! - Virtual keys and modifier flags
//! - The `HotKey` shortcut identity and its string syntax
//! - OS-facing values (window handles, atoms, error codes)
//! - Error types
//! - Configuration types

mod config;
mod error;
mod hotkey;
mod key;
mod modifiers;
mod os;

pub use config::{config_dir, config_path, load_config, AppConfig, HotkeyBinding};
pub use error::{ConfigError, HotKeyError, ParseError};
pub use hotkey::HotKey;
pub use key::VirtualKey;
pub use modifiers::Modifiers;
pub use os::{AtomId, OsErrorCode, WindowHandle};
