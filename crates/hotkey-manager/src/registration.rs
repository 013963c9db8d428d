//! One global hotkey and its binding lifecycle.
//!
//! ## Lifecycle
//!
//! ```text
//! UNREGISTERED --register() ok-------> REGISTERED
//! UNREGISTERED --register() err------> UNREGISTERED
//! REGISTERED   --unregister() ok-----> UNREGISTERED
//! REGISTERED   --unregister() err----> REGISTERED
//! REGISTERED   --dispose() / drop----> UNREGISTERED (failures logged)
//! ```
//!
//! `register` runs allocate -> bind -> install filter; `unregister` runs
//! unbind -> release -> clear id -> remove filter. A failed `register`
//! releases whatever it allocated, so the entity is left fully unbound.
//!
//! ## Notifications
//!
//! While bound, the registration sits in the host's [`MessageFilters`]. A
//! `WM_HOTKEY` addressed to its owner window with its id fires every
//! subscriber, in subscription order, on the dispatching thread. A panic
//! in a subscriber unwinds into the dispatch loop.

use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hotkey_core::{AtomId, HotKey, HotKeyError, Modifiers, VirtualKey, WindowHandle};

use crate::atom::IdentifierAllocator;
use crate::filters::{MessageFilter, MessageFilters};
use crate::message::{FilterOutcome, Message};
use crate::platform::HotKeyApi;

/// Global counter for subscription ids.
static SUBSCRIPTION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Handle returned by [`HotKeyRegistration::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    fn next() -> Self {
        Self(SUBSCRIPTION_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Payload delivered to `pressed` subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotKeyEvent {
    pub hotkey: HotKey,
    pub owner: WindowHandle,
    pub id: AtomId,
}

/// A `pressed` subscriber.
pub type PressedHandler = Arc<dyn Fn(&HotKeyEvent) + Send + Sync>;

/// State shared between a registration and the filter list.
struct Binding {
    hotkey: HotKey,
    owner: WindowHandle,
    id: Mutex<Option<AtomId>>,
    pressed: RwLock<Vec<(SubscriptionId, PressedHandler)>>,
}

impl Binding {
    fn id(&self) -> Option<AtomId> {
        *self.id.lock()
    }

    fn set_id(&self, id: Option<AtomId>) {
        *self.id.lock() = id;
    }
}

impl MessageFilter for Binding {
    fn pre_filter(&self, message: &Message) -> FilterOutcome {
        if !message.is_hotkey() || message.window != self.owner {
            return FilterOutcome::Pass;
        }

        let Some(id) = self.id() else {
            return FilterOutcome::Pass;
        };
        if message.wparam != usize::from(id.get()) {
            return FilterOutcome::Pass;
        }

        // Snapshot so subscribers can (un)subscribe from inside a callback.
        let handlers: Vec<PressedHandler> = self
            .pressed
            .read()
            .iter()
            .map(|(_, handler)| handler.clone())
            .collect();
        if handlers.is_empty() {
            return FilterOutcome::Pass;
        }

        tracing::debug!("Hotkey {} pressed ({} subscribers)", self.hotkey, handlers.len());
        let event = HotKeyEvent {
            hotkey: self.hotkey,
            owner: self.owner,
            id,
        };
        for handler in handlers {
            handler(&event);
        }

        FilterOutcome::Handled
    }
}

/// A global hotkey bound (or bindable) to an owner window.
///
/// Creating one performs no OS calls. Dropping it tears the binding down,
/// so a registration is released on every exit path of the scope that
/// owns it.
///
/// Equality and hashing consider only the key and modifiers.
pub struct HotKeyRegistration {
    binding: Arc<Binding>,
    filter: Arc<dyn MessageFilter>,
    api: Arc<dyn HotKeyApi>,
    allocator: IdentifierAllocator,
    filters: Arc<MessageFilters>,
    disposed: bool,
}

impl HotKeyRegistration {
    /// Create an unbound registration.
    ///
    /// `owner` may be [`WindowHandle::NONE`] to target the calling thread.
    pub fn new(
        hotkey: HotKey,
        owner: WindowHandle,
        api: Arc<dyn HotKeyApi>,
        filters: Arc<MessageFilters>,
    ) -> Self {
        let binding = Arc::new(Binding {
            hotkey,
            owner,
            id: Mutex::new(None),
            pressed: RwLock::new(Vec::new()),
        });
        Self {
            filter: binding.clone(),
            binding,
            allocator: IdentifierAllocator::new(api.clone()),
            api,
            filters,
            disposed: false,
        }
    }

    pub fn hotkey(&self) -> HotKey {
        self.binding.hotkey
    }

    pub fn key(&self) -> VirtualKey {
        self.binding.hotkey.key
    }

    pub fn modifiers(&self) -> Modifiers {
        self.binding.hotkey.modifiers
    }

    pub fn owner(&self) -> WindowHandle {
        self.binding.owner
    }

    /// The OS identifier, present only while bound.
    pub fn id(&self) -> Option<AtomId> {
        self.binding.id()
    }

    pub fn is_registered(&self) -> bool {
        self.id().is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether this registration is installed in the filter list.
    pub fn is_intercepting(&self) -> bool {
        self.filters.contains(&self.filter)
    }

    // =========================================================================
    // Subscribers
    // =========================================================================

    /// Subscribe to presses. Subscribers fire in subscription order.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&HotKeyEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::next();
        self.binding.pressed.write().push((id, Arc::new(handler)));
        id
    }

    /// Remove a subscriber.
    ///
    /// Returns `true` if it was subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut pressed = self.binding.pressed.write();
        match pressed.iter().position(|(sub, _)| *sub == id) {
            Some(pos) => {
                pressed.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.binding.pressed.read().len()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Bind the hotkey with the OS and start intercepting its notifications.
    ///
    /// Returns `Ok(true)` once bound (immediately, if already bound) and
    /// `Ok(false)` if the OS declined without an error code. On any failure
    /// the allocated identifier is released and the registration stays unbound.
    pub fn register(&mut self) -> Result<bool, HotKeyError> {
        let hotkey = self.hotkey();
        if self.disposed {
            return Err(HotKeyError::Disposed(hotkey));
        }
        if self.is_registered() {
            return Ok(true);
        }

        let atom = self.allocator.allocate(&hotkey)?;

        let bound = match self
            .api
            .register_hotkey(self.owner(), atom, hotkey.modifiers, hotkey.key)
        {
            Ok(bound) => bound,
            Err(code) => {
                tracing::warn!("OS refused to register {}: {}", hotkey, code);
                self.release_unbound(atom);
                return Err(HotKeyError::Registration { hotkey, code });
            }
        };

        if !bound {
            tracing::warn!("OS declined to register {} without an error", hotkey);
            self.release_unbound(atom);
            return Ok(false);
        }

        self.binding.set_id(Some(atom));
        self.filters.add(self.filter.clone());
        tracing::info!("Registered {} as {} on {}", hotkey, atom, self.owner());
        Ok(true)
    }

    /// Unbind the hotkey and stop intercepting.
    ///
    /// A no-op when unbound. If the OS refuses to unbind, the registration
    /// stays bound and the call may be retried. If releasing the identifier
    /// fails the registration is still cleared, and the release error is
    /// returned.
    pub fn unregister(&mut self) -> Result<(), HotKeyError> {
        let Some(atom) = self.id() else {
            return Ok(());
        };
        let hotkey = self.hotkey();

        if let Err(code) = self.api.unregister_hotkey(self.owner(), atom) {
            tracing::warn!("OS refused to unregister {}: {}", hotkey, code);
            return Err(HotKeyError::Unregistration { hotkey, code });
        }

        let released = self.allocator.release(atom);
        if let Err(e) = &released {
            tracing::error!("Identifier for {} is in an undefined state: {}", hotkey, e);
        }

        self.binding.set_id(None);
        self.filters.remove(&self.filter);
        tracing::info!("Unregistered {}", hotkey);
        released
    }

    /// Tear the registration down. Only the first call does anything.
    ///
    /// Failures are logged, never returned. Unlike [`unregister`], a refused
    /// unbind does not keep the registration alive: the identifier is still
    /// released and the filter removed, so nothing fires after teardown.
    ///
    /// [`unregister`]: HotKeyRegistration::unregister
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        match self.unregister() {
            Ok(()) => {}
            Err(HotKeyError::Unregistration { hotkey, code }) => {
                tracing::error!("OS refused to unregister {} during teardown: {}", hotkey, code);
                if let Some(atom) = self.id() {
                    self.release_unbound(atom);
                }
                self.binding.set_id(None);
                self.filters.remove(&self.filter);
            }
            Err(e) => tracing::error!("Failed to tear down {}: {}", self.hotkey(), e),
        }
    }

    /// Release an identifier that is no longer bound.
    fn release_unbound(&self, atom: AtomId) {
        if let Err(e) = self.allocator.release(atom) {
            tracing::error!("Leaked identifier: {}", e);
        }
    }
}

impl Drop for HotKeyRegistration {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl PartialEq for HotKeyRegistration {
    fn eq(&self, other: &Self) -> bool {
        self.hotkey() == other.hotkey()
    }
}

impl Eq for HotKeyRegistration {}

impl Hash for HotKeyRegistration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hotkey().hash(state);
    }
}

impl fmt::Debug for HotKeyRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotKeyRegistration")
            .field("hotkey", &self.hotkey())
            .field("owner", &self.owner())
            .field("id", &self.id())
            .field("subscribers", &self.subscriber_count())
            .field("disposed", &self.disposed)
            .finish()
    }
}
