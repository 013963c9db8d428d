//! Virtual key codes.
//!
//! Codes follow the Win32 `VK_*` numbering. Only non-modifier keys belong
//! here; Ctrl/Alt/Shift/Win are expressed through [`crate::Modifiers`].

use std::fmt;

/// A non-modifier virtual key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualKey(u16);

impl VirtualKey {
    pub const BACKSPACE: Self = Self(0x08);
    pub const TAB: Self = Self(0x09);
    pub const RETURN: Self = Self(0x0D);
    pub const PAUSE: Self = Self(0x13);
    pub const ESCAPE: Self = Self(0x1B);
    pub const SPACE: Self = Self(0x20);
    pub const PAGE_UP: Self = Self(0x21);
    pub const PAGE_DOWN: Self = Self(0x22);
    pub const END: Self = Self(0x23);
    pub const HOME: Self = Self(0x24);
    pub const LEFT: Self = Self(0x25);
    pub const UP: Self = Self(0x26);
    pub const RIGHT: Self = Self(0x27);
    pub const DOWN: Self = Self(0x28);
    pub const PRINT_SCREEN: Self = Self(0x2C);
    pub const INSERT: Self = Self(0x2D);
    pub const DELETE: Self = Self(0x2E);

    pub const A: Self = Self(0x41);
    pub const F: Self = Self(0x46);
    pub const Q: Self = Self(0x51);
    pub const Z: Self = Self(0x5A);

    pub const NUMPAD0: Self = Self(0x60);
    pub const F1: Self = Self(0x70);
    pub const F9: Self = Self(0x78);
    pub const F12: Self = Self(0x7B);
    pub const F24: Self = Self(0x87);

    /// Build a key from a raw code.
    ///
    /// The upper bits of a packed key value (where some toolkits store
    /// modifier state) are stripped; only the low byte names a key.
    pub const fn new(code: u32) -> Self {
        Self((code & 0xFF) as u16)
    }

    /// The raw virtual key code.
    pub const fn code(self) -> u16 {
        self.0
    }

    /// Look up a key by its user-facing name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();

        if let [c] = name.as_bytes() {
            return match c {
                b'a'..=b'z' => Some(Self(u16::from(c.to_ascii_uppercase()))),
                b'0'..=b'9' => Some(Self(u16::from(*c))),
                _ => None,
            };
        }

        if let Some(n) = name.strip_prefix('f').and_then(|n| n.parse::<u16>().ok()) {
            return (1..=24).contains(&n).then(|| Self(Self::F1.0 + n - 1));
        }

        if let Some(n) = name.strip_prefix("numpad").and_then(|n| n.parse::<u16>().ok()) {
            return (n <= 9).then(|| Self(Self::NUMPAD0.0 + n));
        }

        Some(match name.as_str() {
            "backspace" => Self::BACKSPACE,
            "tab" => Self::TAB,
            "return" | "enter" => Self::RETURN,
            "pause" => Self::PAUSE,
            "escape" | "esc" => Self::ESCAPE,
            "space" => Self::SPACE,
            "pageup" | "pgup" => Self::PAGE_UP,
            "pagedown" | "pgdn" => Self::PAGE_DOWN,
            "end" => Self::END,
            "home" => Self::HOME,
            "left" => Self::LEFT,
            "up" => Self::UP,
            "right" => Self::RIGHT,
            "down" => Self::DOWN,
            "printscreen" | "prtsc" => Self::PRINT_SCREEN,
            "insert" | "ins" => Self::INSERT,
            "delete" | "del" => Self::DELETE,
            _ => return None,
        })
    }
}

impl From<u16> for VirtualKey {
    fn from(code: u16) -> Self {
        Self::new(u32::from(code))
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = self.0;
        match code {
            0x30..=0x39 | 0x41..=0x5A => write!(f, "{}", char::from(code as u8)),
            0x60..=0x69 => write!(f, "Numpad{}", code - Self::NUMPAD0.0),
            0x70..=0x87 => write!(f, "F{}", code - Self::F1.0 + 1),
            _ => {
                let name = match *self {
                    Self::BACKSPACE => "Backspace",
                    Self::TAB => "Tab",
                    Self::RETURN => "Enter",
                    Self::PAUSE => "Pause",
                    Self::ESCAPE => "Escape",
                    Self::SPACE => "Space",
                    Self::PAGE_UP => "PageUp",
                    Self::PAGE_DOWN => "PageDown",
                    Self::END => "End",
                    Self::HOME => "Home",
                    Self::LEFT => "Left",
                    Self::UP => "Up",
                    Self::RIGHT => "Right",
                    Self::DOWN => "Down",
                    Self::PRINT_SCREEN => "PrintScreen",
                    Self::INSERT => "Insert",
                    Self::DELETE => "Delete",
                    _ => return write!(f, "VK({:#04X})", code),
                };
                f.write_str(name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_letters_and_digits() {
        assert_eq!(VirtualKey::from_name("a"), Some(VirtualKey::A));
        assert_eq!(VirtualKey::from_name("Z"), Some(VirtualKey::Z));
        assert_eq!(VirtualKey::from_name("7").map(VirtualKey::code), Some(0x37));
    }

    #[test]
    fn test_from_name_function_keys() {
        assert_eq!(VirtualKey::from_name("f1"), Some(VirtualKey::F1));
        assert_eq!(VirtualKey::from_name("F9"), Some(VirtualKey::F9));
        assert_eq!(VirtualKey::from_name("f24"), Some(VirtualKey::F24));
        assert_eq!(VirtualKey::from_name("f25"), None);
        assert_eq!(VirtualKey::from_name("f0"), None);
    }

    #[test]
    fn test_from_name_named_keys() {
        assert_eq!(VirtualKey::from_name("esc"), Some(VirtualKey::ESCAPE));
        assert_eq!(VirtualKey::from_name("PageDown"), Some(VirtualKey::PAGE_DOWN));
        assert_eq!(VirtualKey::from_name("numpad3").map(VirtualKey::code), Some(0x63));
        assert_eq!(VirtualKey::from_name("hyper"), None);
    }

    #[test]
    fn test_new_strips_packed_modifier_bits() {
        // Ctrl bit in the upper word of a packed key value.
        assert_eq!(VirtualKey::new(0x0002_0078), VirtualKey::F9);
    }

    #[test]
    fn test_display() {
        assert_eq!(VirtualKey::F9.to_string(), "F9");
        assert_eq!(VirtualKey::A.to_string(), "A");
        assert_eq!(VirtualKey::PAGE_UP.to_string(), "PageUp");
        assert_eq!(VirtualKey::from(0x63).to_string(), "Numpad3");
        assert_eq!(VirtualKey::from(0xE5).to_string(), "VK(0xE5)");
    }
}
