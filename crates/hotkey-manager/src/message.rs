//! Messages flowing through the host's dispatch loop.

use hotkey_core::{AtomId, HotKey, WindowHandle};

/// Message tag the OS posts when a registered hotkey is pressed.
pub const WM_HOTKEY: u32 = 0x0312;

/// One dispatched message, as an opaque `(type, window, wparam, lparam)` tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub kind: u32,
    pub window: WindowHandle,
    pub wparam: usize,
    pub lparam: isize,
}

impl Message {
    pub const fn new(kind: u32, window: WindowHandle, wparam: usize, lparam: isize) -> Self {
        Self {
            kind,
            window,
            wparam,
            lparam,
        }
    }

    /// Build the notification the OS posts for a hotkey press.
    ///
    /// `wparam` carries the hotkey id; `lparam` packs the key code in the
    /// high word and the modifiers in the low word.
    pub fn hotkey(owner: WindowHandle, id: AtomId, hotkey: HotKey) -> Self {
        let lparam = (isize::from(hotkey.key.code() as u8) << 16)
            | (hotkey.modifiers.chord().bits() & 0xFFFF) as isize;
        Self::new(WM_HOTKEY, owner, usize::from(id.get()), lparam)
    }

    pub fn is_hotkey(&self) -> bool {
        self.kind == WM_HOTKEY
    }
}

/// What a filter did with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Fully handled; the loop must skip default processing.
    Handled,

    /// Not recognized; the message continues through the loop unchanged.
    Pass,
}

impl FilterOutcome {
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }
}

#[cfg(windows)]
impl From<&windows::Win32::UI::WindowsAndMessaging::MSG> for Message {
    fn from(msg: &windows::Win32::UI::WindowsAndMessaging::MSG) -> Self {
        Self::new(
            msg.message,
            WindowHandle(msg.hwnd.0 as isize),
            msg.wParam.0,
            msg.lParam.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotkey_core::{Modifiers, VirtualKey};

    #[test]
    fn test_hotkey_message_layout() {
        let id = AtomId::new(0xC005).unwrap();
        let hotkey = HotKey::new(VirtualKey::F9, Modifiers::CONTROL | Modifiers::NO_REPEAT);
        let message = Message::hotkey(WindowHandle(0x44), id, hotkey);

        assert!(message.is_hotkey());
        assert_eq!(message.window, WindowHandle(0x44));
        assert_eq!(message.wparam, 0xC005);
        assert_eq!(message.lparam, 0x0078_0002);
    }

    #[test]
    fn test_other_messages_are_not_hotkeys() {
        // WM_TIMER
        let message = Message::new(0x0113, WindowHandle::NONE, 1, 0);
        assert!(!message.is_hotkey());
    }
}
