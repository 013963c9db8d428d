//! The OS boundary.
//!
//! Each method wraps one native call together with its last-error read and
//! reports the outcome as a `Result`. Callers never see the
//! clear-before/read-after protocol.

use hotkey_core::{AtomId, Modifiers, OsErrorCode, VirtualKey, WindowHandle};

pub mod simulated;

#[cfg(windows)]
pub mod win32;

pub use simulated::SimulatedApi;

#[cfg(windows)]
pub use win32::Win32Api;

/// Global name table and hotkey registration primitives.
#[cfg_attr(test, mockall::automock)]
pub trait HotKeyApi: Send + Sync {
    /// Add `name` to the global name table (or bump its reference count).
    fn add_atom(&self, name: &str) -> Result<AtomId, OsErrorCode>;

    /// Drop one reference to `atom`.
    fn delete_atom(&self, atom: AtomId) -> Result<(), OsErrorCode>;

    /// Bind `(owner, id)` to the key combination.
    ///
    /// `Ok(false)` means the OS declined without reporting an error code.
    fn register_hotkey(
        &self,
        owner: WindowHandle,
        id: AtomId,
        modifiers: Modifiers,
        key: VirtualKey,
    ) -> Result<bool, OsErrorCode>;

    /// Release the binding for `(owner, id)`.
    fn unregister_hotkey(&self, owner: WindowHandle, id: AtomId) -> Result<(), OsErrorCode>;
}
