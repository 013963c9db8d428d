//! The owner of a dispatch loop's hotkey machinery.
//!
//! `HotKeyHost` holds the OS backend and the filter list. Whatever drives
//! the message loop owns the host, creates registrations through it and
//! passes every message to [`HotKeyHost::dispatch`].

use std::sync::Arc;

use hotkey_core::{HotKey, HotKeyError, WindowHandle};

use crate::filters::MessageFilters;
use crate::message::{FilterOutcome, Message};
use crate::platform::HotKeyApi;
use crate::registration::HotKeyRegistration;

pub struct HotKeyHost {
    api: Arc<dyn HotKeyApi>,
    filters: Arc<MessageFilters>,
}

impl HotKeyHost {
    /// Create a host over an OS backend.
    pub fn new(api: Arc<dyn HotKeyApi>) -> Self {
        Self {
            api,
            filters: Arc::new(MessageFilters::new()),
        }
    }

    /// Create a host over the native Win32 backend.
    #[cfg(windows)]
    pub fn native() -> Self {
        Self::new(Arc::new(crate::platform::Win32Api::new()))
    }

    pub fn api(&self) -> &Arc<dyn HotKeyApi> {
        &self.api
    }

    pub fn filters(&self) -> &Arc<MessageFilters> {
        &self.filters
    }

    /// Create an unbound registration.
    pub fn registration(&self, hotkey: HotKey, owner: WindowHandle) -> HotKeyRegistration {
        HotKeyRegistration::new(hotkey, owner, self.api.clone(), self.filters.clone())
    }

    /// Create a registration and bind it.
    ///
    /// On error nothing stays allocated. If the OS declined without an
    /// error code the returned registration is unbound; check
    /// [`HotKeyRegistration::is_registered`]. The binding is released when
    /// the registration is dropped.
    pub fn acquire(
        &self,
        hotkey: HotKey,
        owner: WindowHandle,
    ) -> Result<HotKeyRegistration, HotKeyError> {
        let mut registration = self.registration(hotkey, owner);
        registration.register()?;
        Ok(registration)
    }

    /// Offer a dispatched message to every live registration.
    ///
    /// `Handled` means the loop must skip its default processing.
    pub fn dispatch(&self, message: &Message) -> FilterOutcome {
        self.filters.dispatch(message)
    }

    /// Number of registrations currently intercepting messages.
    pub fn active_count(&self) -> usize {
        self.filters.len()
    }
}
