//! Scripted dispatch loop over the simulated backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use hotkey_core::WindowHandle;
use hotkey_manager::{HotKeyHost, Message, SimulatedApi};

use crate::bindings::{bind_all, NamedHotKey};

/// Stand-in for the demo's message window.
const OWNER: WindowHandle = WindowHandle(0x1);

/// WM_TIMER, used as unrelated loop traffic.
const WM_TIMER: u32 = 0x0113;

/// Bind everything, press each non-quit hotkey twice, then press quit.
pub fn run(bindings: &[NamedHotKey]) -> Result<(), String> {
    let api = Arc::new(SimulatedApi::new());
    let host = HotKeyHost::new(api.clone());

    let quit = Arc::new(AtomicBool::new(false));
    let flag = quit.clone();
    let registrations = bind_all(&host, bindings, OWNER, move || {
        flag.store(true, Ordering::SeqCst);
    })?;

    let mut queue = VecDeque::new();
    for binding in bindings.iter().filter(|b| !b.is_quit()) {
        if let Some(message) = api.press(OWNER, binding.hotkey) {
            queue.push_back(message);
            queue.push_back(Message::new(WM_TIMER, OWNER, 1, 0));
            queue.push_back(message);
        }
    }
    if let Some(message) = bindings
        .iter()
        .find(|b| b.is_quit())
        .and_then(|b| api.press(OWNER, b.hotkey))
    {
        queue.push_back(message);
    }

    tracing::info!("Entering simulated message loop ({} messages)", queue.len());
    while let Some(message) = queue.pop_front() {
        if !host.dispatch(&message).is_handled() {
            tracing::debug!("Default processing for message {:#06x}", message.kind);
        }
        if quit.load(Ordering::SeqCst) {
            tracing::info!("Quit requested");
            break;
        }
    }

    drop(registrations);
    tracing::info!(
        "Released all hotkeys ({} atoms, {} bindings left)",
        api.atom_count(),
        api.binding_count()
    );
    Ok(())
}
