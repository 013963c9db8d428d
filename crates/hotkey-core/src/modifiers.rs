//! Modifier key flags.

use std::fmt;

bitflags::bitflags! {
    /// Modifier set for a global hotkey, using the Win32 `MOD_*` encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Modifiers: u32 {
        const ALT = 0x0001;
        const CONTROL = 0x0002;
        const SHIFT = 0x0004;
        const WIN = 0x0008;
        /// Suppress repeated notifications while the combination is held.
        const NO_REPEAT = 0x4000;
    }
}

impl Modifiers {
    /// The modifiers that take part in matching a key press.
    ///
    /// `NO_REPEAT` changes delivery, not which combination is bound.
    pub fn chord(self) -> Self {
        self - Self::NO_REPEAT
    }

    /// Parse a single modifier token like "ctrl" or "win".
    pub fn from_token(name: &str) -> Option<Self> {
        Some(match name.trim().to_ascii_lowercase().as_str() {
            "alt" | "option" | "opt" => Self::ALT,
            "ctrl" | "control" => Self::CONTROL,
            "shift" => Self::SHIFT,
            "win" | "super" | "meta" | "cmd" => Self::WIN,
            "norepeat" | "no_repeat" | "no-repeat" => Self::NO_REPEAT,
            _ => return None,
        })
    }
}

impl fmt::Display for Modifiers {
    /// Writes modifiers in canonical order, each followed by `+`.
    ///
    /// The output parses back to the same set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, label) in [
            (Self::CONTROL, "Ctrl+"),
            (Self::ALT, "Alt+"),
            (Self::SHIFT, "Shift+"),
            (Self::WIN, "Win+"),
            (Self::NO_REPEAT, "NoRepeat+"),
        ] {
            if self.contains(flag) {
                f.write_str(label)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_token() {
        assert_eq!(Modifiers::from_token("Ctrl"), Some(Modifiers::CONTROL));
        assert_eq!(Modifiers::from_token("super"), Some(Modifiers::WIN));
        assert_eq!(Modifiers::from_token("norepeat"), Some(Modifiers::NO_REPEAT));
        assert_eq!(Modifiers::from_token("f9"), None);
    }

    #[test]
    fn test_chord_drops_no_repeat() {
        let mods = Modifiers::CONTROL | Modifiers::NO_REPEAT;
        assert_eq!(mods.chord(), Modifiers::CONTROL);
        assert_eq!(Modifiers::SHIFT.chord(), Modifiers::SHIFT);
    }

    #[test]
    fn test_display_order() {
        let mods = Modifiers::WIN | Modifiers::SHIFT | Modifiers::CONTROL | Modifiers::NO_REPEAT;
        assert_eq!(mods.to_string(), "Ctrl+Shift+Win+NoRepeat+");
        assert_eq!(mods.chord().to_string(), "Ctrl+Shift+Win+");
        assert_eq!(Modifiers::empty().to_string(), "");
    }

    #[test]
    fn test_win32_encoding() {
        assert_eq!((Modifiers::CONTROL | Modifiers::ALT).bits(), 0x3);
        assert_eq!(Modifiers::NO_REPEAT.bits(), 0x4000);
    }
}
