//! Win32 backend using the global atom table and `RegisterHotKey`.
//!
//! Every call clears the thread's last-error value first and reads it
//! straight after, since the return value alone does not distinguish a
//! failure from a silent refusal.

use std::ffi::c_void;
use std::iter::once;

use windows::core::PCWSTR;
use windows::Win32::Foundation::{GetLastError, SetLastError, ERROR_SUCCESS, HWND, WIN32_ERROR};
use windows::Win32::System::DataExchange::{GlobalAddAtomW, GlobalDeleteAtom};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS,
};

use hotkey_core::{AtomId, Modifiers, OsErrorCode, VirtualKey, WindowHandle};

use super::HotKeyApi;

/// The native backend. Must be used from the thread that runs the message loop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Api;

impl Win32Api {
    pub fn new() -> Self {
        Self
    }
}

fn hwnd(owner: WindowHandle) -> Option<HWND> {
    (!owner.is_none()).then(|| HWND(owner.0 as *mut c_void))
}

/// Run `call` with the last-error channel cleared, returning its result and
/// whatever error code it left behind.
fn with_last_error<T>(call: impl FnOnce() -> T) -> (T, Option<OsErrorCode>) {
    // SAFETY: SetLastError/GetLastError only touch thread-local state.
    unsafe {
        SetLastError(ERROR_SUCCESS);
        let value = call();
        let WIN32_ERROR(code) = GetLastError();
        (value, (code != ERROR_SUCCESS.0).then_some(OsErrorCode(code)))
    }
}

impl HotKeyApi for Win32Api {
    fn add_atom(&self, name: &str) -> Result<AtomId, OsErrorCode> {
        let wide: Vec<u16> = name.encode_utf16().chain(once(0)).collect();

        // SAFETY: `wide` is NUL-terminated and outlives the call.
        let (raw, error) = with_last_error(|| unsafe { GlobalAddAtomW(PCWSTR(wide.as_ptr())) });

        match (error, AtomId::new(raw)) {
            (None, Some(atom)) => Ok(atom),
            (Some(code), _) => Err(code),
            (None, None) => Err(OsErrorCode::NOT_ENOUGH_MEMORY),
        }
    }

    fn delete_atom(&self, atom: AtomId) -> Result<(), OsErrorCode> {
        // SAFETY: GlobalDeleteAtom validates the atom itself.
        let (_, error) = with_last_error(|| unsafe { GlobalDeleteAtom(atom.get()) });

        match error {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }

    fn register_hotkey(
        &self,
        owner: WindowHandle,
        id: AtomId,
        modifiers: Modifiers,
        key: VirtualKey,
    ) -> Result<bool, OsErrorCode> {
        // SAFETY: RegisterHotKey is an OS API. The window handle is supplied by
        // the caller and validated by the OS.
        let (result, error) = with_last_error(|| unsafe {
            RegisterHotKey(
                hwnd(owner),
                i32::from(id.get()),
                HOT_KEY_MODIFIERS(modifiers.bits()),
                u32::from(key.code()),
            )
        });

        match error {
            Some(code) => Err(code),
            None => Ok(result.is_ok()),
        }
    }

    fn unregister_hotkey(&self, owner: WindowHandle, id: AtomId) -> Result<(), OsErrorCode> {
        // SAFETY: UnregisterHotKey is an OS API.
        let (_, error) =
            with_last_error(|| unsafe { UnregisterHotKey(hwnd(owner), i32::from(id.get())) });

        match error {
            Some(code) => Err(code),
            None => Ok(()),
        }
    }
}
