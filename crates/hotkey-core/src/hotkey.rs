//! The logical shortcut: one key plus a modifier set.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::key::VirtualKey;
use crate::modifiers::Modifiers;

/// A key + modifier combination.
///
/// Two hotkeys are the same shortcut iff key and modifiers match. Which
/// window owns a binding, or whether it is currently bound, is not part of
/// the identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotKey {
    pub key: VirtualKey,
    pub modifiers: Modifiers,
}

impl HotKey {
    /// Create a new hotkey.
    pub const fn new(key: VirtualKey, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Stable hash of the shortcut identity, used to name its atom.
    pub const fn identity_hash(&self) -> u32 {
        (self.key.code() as u32).wrapping_mul(397) ^ self.modifiers.bits()
    }

    /// Return a copy with `NO_REPEAT` added.
    pub fn no_repeat(self) -> Self {
        Self::new(self.key, self.modifiers | Modifiers::NO_REPEAT)
    }
}

impl fmt::Display for HotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.modifiers, self.key)
    }
}

/// Parse a hotkey string like "ctrl+f9" or "ctrl+shift+alt+space".
///
/// Tokens are `+` separated and case-insensitive. Exactly one token must
/// name a non-modifier key; `+` itself cannot be bound.
impl FromStr for HotKey {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseError::Empty);
        }

        let mut modifiers = Modifiers::empty();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            if part.is_empty() {
                return Err(ParseError::EmptyToken(s.to_string()));
            }
            if let Some(flag) = Modifiers::from_token(part) {
                modifiers |= flag;
                continue;
            }
            let parsed = VirtualKey::from_name(part)
                .ok_or_else(|| ParseError::UnknownKey(part.to_string()))?;
            if key.replace(parsed).is_some() {
                return Err(ParseError::MultipleKeys(s.to_string()));
            }
        }

        key.map(|key| Self::new(key, modifiers))
            .ok_or_else(|| ParseError::MissingKey(s.to_string()))
    }
}
