//! Win32 message loop on a message-only window.

use windows::core::PCWSTR;
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
    PostQuitMessage, RegisterClassExW, TranslateMessage, HWND_MESSAGE, MSG, WINDOW_EX_STYLE,
    WINDOW_STYLE, WNDCLASSEXW,
};

use hotkey_core::WindowHandle;
use hotkey_manager::{HotKeyHost, Message};

use crate::bindings::{bind_all, NamedHotKey};

/// Bind everything to a message-only window and pump messages until quit.
pub fn run(bindings: &[NamedHotKey]) -> Result<(), String> {
    let hwnd = create_msg_window()?;
    let owner = WindowHandle(hwnd.0 as isize);

    let host = HotKeyHost::native();
    let registrations = match bind_all(&host, bindings, owner, || {
        // SAFETY: called from a subscriber, i.e. on the message loop thread.
        unsafe { PostQuitMessage(0) }
    }) {
        Ok(registrations) => registrations,
        Err(e) => {
            destroy_msg_window(hwnd);
            return Err(e);
        }
    };

    tracing::info!("Entering message loop");
    let mut msg = MSG::default();
    loop {
        // SAFETY: standard message pump on the thread that owns `hwnd`.
        unsafe {
            let ret = GetMessageW(&mut msg, None, 0, 0);
            if ret.0 <= 0 {
                break;
            }

            if host.dispatch(&Message::from(&msg)).is_handled() {
                continue;
            }

            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    // Unbind before the owner window goes away.
    drop(registrations);
    destroy_msg_window(hwnd);
    Ok(())
}

fn create_msg_window() -> Result<HWND, String> {
    // SAFETY: plain window class registration and creation; the class name
    // buffer outlives both calls.
    unsafe {
        let hinstance = GetModuleHandleW(None).map_err(|e| e.to_string())?;
        let class_name: Vec<u16> = "HotkeyDemoMsg\0".encode_utf16().collect();

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            lpfnWndProc: Some(msg_wnd_proc),
            hInstance: hinstance.into(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };
        RegisterClassExW(&wc);

        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            PCWSTR(class_name.as_ptr()),
            PCWSTR::null(),
            WINDOW_STYLE::default(),
            0,
            0,
            0,
            0,
            Some(HWND_MESSAGE),
            None,
            Some(hinstance.into()),
            None,
        )
        .map_err(|e| format!("Failed to create message window: {}", e))
    }
}

fn destroy_msg_window(hwnd: HWND) {
    // SAFETY: `hwnd` was created by this thread.
    if let Err(e) = unsafe { DestroyWindow(hwnd) } {
        tracing::warn!("Failed to destroy message window: {}", e);
    }
}

unsafe extern "system" fn msg_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    DefWindowProcW(hwnd, msg, wparam, lparam)
}
