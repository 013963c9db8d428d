//! Global hotkey registration for a message-loop application.
//!
//! This crate provides:
//! - `HotKeyApi`, the OS boundary, with a Win32 and a simulated backend
//! - `IdentifierAllocator` for collision-free hotkey ids from the atom table
//! - `HotKeyRegistration`, one hotkey's register/unregister lifecycle
//! - `MessageFilters`, the interceptor list the dispatch loop consults
//! - `HotKeyHost`, which ties a backend and a filter list to one loop
//!
//! ## Flow
//!
//! ```text
//! register():  allocate id ──► RegisterHotKey(owner, id) ──► install filter
//!
//! OS queue ──► dispatch loop ──► HotKeyHost::dispatch(msg)
//!                                   │
//!                                   ▼
//!                      WM_HOTKEY && owner && id match?
//!                          │ yes                │ no
//!                          ▼                    ▼
//!                   fire subscribers       Pass (default routing)
//!                   return Handled
//! ```
//!
//! Everything runs on the thread that owns the message loop: the OS only
//! delivers a hotkey to the thread that registered it.

pub mod atom;
pub mod filters;
pub mod host;
pub mod message;
pub mod platform;
pub mod registration;

pub use atom::{atom_name, IdentifierAllocator};
pub use filters::{MessageFilter, MessageFilters};
pub use host::HotKeyHost;
pub use message::{FilterOutcome, Message, WM_HOTKEY};
pub use platform::{HotKeyApi, SimulatedApi};
pub use registration::{HotKeyEvent, HotKeyRegistration, PressedHandler, SubscriptionId};

#[cfg(windows)]
pub use platform::Win32Api;

// Re-export hotkey_core types for convenience
pub use hotkey_core::{
    AtomId, HotKey, HotKeyError, Modifiers, OsErrorCode, VirtualKey, WindowHandle,
};
