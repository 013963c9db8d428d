//! Values exchanged with the operating system.

use std::fmt;
use std::num::NonZeroU16;

/// The window a hotkey notification is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    /// No window: notifications go to the registering thread's queue.
    pub const NONE: Self = Self(0);

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("<thread>")
        } else {
            write!(f, "{:#x}", self.0)
        }
    }
}

/// A token from the global name (atom) table. Also serves as the hotkey id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(NonZeroU16);

impl AtomId {
    /// Wrap a raw atom value; zero is never a valid atom.
    pub const fn new(raw: u16) -> Option<Self> {
        match NonZeroU16::new(raw) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.get())
    }
}

/// A raw OS error code as read from the last-error channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OsErrorCode(pub u32);

impl OsErrorCode {
    pub const INVALID_HANDLE: Self = Self(6);
    pub const NOT_ENOUGH_MEMORY: Self = Self(8);
    pub const HOTKEY_ALREADY_REGISTERED: Self = Self(1409);
    pub const HOTKEY_NOT_REGISTERED: Self = Self(1419);

    fn description(self) -> Option<&'static str> {
        Some(match self {
            Self::INVALID_HANDLE => "invalid handle",
            Self::NOT_ENOUGH_MEMORY => "not enough memory",
            Self::HOTKEY_ALREADY_REGISTERED => "hotkey is already registered",
            Self::HOTKEY_NOT_REGISTERED => "hotkey is not registered",
            _ => return None,
        })
    }
}

impl fmt::Display for OsErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.description() {
            Some(text) => write!(f, "os error {} ({})", self.0, text),
            None => write!(f, "os error {}", self.0),
        }
    }
}
