//! In-memory OS backend.
//!
//! Models the global name table and the hotkey table closely enough to
//! drive the registration lifecycle without a real desktop session: atoms
//! are reference counted, duplicate bindings are rejected with the same
//! codes Win32 uses, and `press` produces the notification the OS would
//! post for a bound combination.

use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use hotkey_core::{AtomId, HotKey, Modifiers, OsErrorCode, VirtualKey, WindowHandle};

use super::HotKeyApi;
use crate::message::Message;

/// First value handed out by the name table (string atoms live at 0xC000+).
const FIRST_ATOM: u16 = 0xC000;

/// Number of string atoms the global table can hold.
const DEFAULT_CAPACITY: usize = 0x3FFF;

#[derive(Debug)]
struct AtomEntry {
    atom: AtomId,
    refs: usize,
}

#[derive(Debug, Clone, Copy)]
struct BoundKey {
    chord: Modifiers,
    key: VirtualKey,
}

#[derive(Debug, Default)]
struct State {
    capacity: usize,
    next_atom: u16,
    atoms: HashMap<String, AtomEntry>,
    names: HashMap<AtomId, String>,
    bindings: HashMap<(WindowHandle, AtomId), BoundKey>,
    external: HashSet<(Modifiers, VirtualKey)>,
    decline_next: bool,
    register_calls: usize,
    unregister_calls: usize,
}

impl State {
    fn next_free_atom(&mut self) -> Option<AtomId> {
        for _ in 0..=DEFAULT_CAPACITY {
            let candidate = AtomId::new(self.next_atom)?;
            self.next_atom = self.next_atom.checked_add(1).unwrap_or(FIRST_ATOM);
            if !self.names.contains_key(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// A simulated global atom table and hotkey table.
#[derive(Debug)]
pub struct SimulatedApi {
    state: Mutex<State>,
}

impl SimulatedApi {
    /// Create a backend with the default name table capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a backend whose name table holds at most `capacity` names.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Mutex::new(State {
                capacity,
                next_atom: FIRST_ATOM,
                ..State::default()
            }),
        }
    }

    /// Mark `hotkey` as taken by another process.
    pub fn reserve_external(&self, hotkey: HotKey) {
        self.state
            .lock()
            .external
            .insert((hotkey.modifiers.chord(), hotkey.key));
    }

    /// Make the next `register_hotkey` return `false` with no error code.
    pub fn decline_next_registration(&self) {
        self.state.lock().decline_next = true;
    }

    /// Simulate the user pressing `hotkey` while it is bound to `owner`.
    ///
    /// Returns the notification the OS would post, or `None` if nothing
    /// is bound to that combination for `owner`.
    pub fn press(&self, owner: WindowHandle, hotkey: HotKey) -> Option<Message> {
        let state = self.state.lock();
        state
            .bindings
            .iter()
            .find(|((window, _), bound)| {
                *window == owner
                    && bound.key == hotkey.key
                    && bound.chord == hotkey.modifiers.chord()
            })
            .map(|((_, id), _)| Message::hotkey(owner, *id, hotkey))
    }

    /// Number of distinct names in the table.
    pub fn atom_count(&self) -> usize {
        self.state.lock().atoms.len()
    }

    /// Reference count held on `atom`, zero if it is not allocated.
    pub fn atom_refs(&self, atom: AtomId) -> usize {
        let state = self.state.lock();
        state
            .names
            .get(&atom)
            .and_then(|name| state.atoms.get(name))
            .map_or(0, |entry| entry.refs)
    }

    /// Number of live hotkey bindings.
    pub fn binding_count(&self) -> usize {
        self.state.lock().bindings.len()
    }

    /// Whether `(owner, id)` is currently bound.
    pub fn is_bound(&self, owner: WindowHandle, id: AtomId) -> bool {
        self.state.lock().bindings.contains_key(&(owner, id))
    }

    /// Number of `register_hotkey` calls made so far.
    pub fn register_calls(&self) -> usize {
        self.state.lock().register_calls
    }

    /// Number of `unregister_hotkey` calls made so far.
    pub fn unregister_calls(&self) -> usize {
        self.state.lock().unregister_calls
    }
}

impl Default for SimulatedApi {
    fn default() -> Self {
        Self::new()
    }
}

impl HotKeyApi for SimulatedApi {
    fn add_atom(&self, name: &str) -> Result<AtomId, OsErrorCode> {
        let mut state = self.state.lock();

        if let Some(entry) = state.atoms.get_mut(name) {
            entry.refs += 1;
            return Ok(entry.atom);
        }

        if state.atoms.len() >= state.capacity {
            return Err(OsErrorCode::NOT_ENOUGH_MEMORY);
        }

        let atom = state
            .next_free_atom()
            .ok_or(OsErrorCode::NOT_ENOUGH_MEMORY)?;
        state
            .atoms
            .insert(name.to_string(), AtomEntry { atom, refs: 1 });
        state.names.insert(atom, name.to_string());
        Ok(atom)
    }

    fn delete_atom(&self, atom: AtomId) -> Result<(), OsErrorCode> {
        let mut state = self.state.lock();

        let name = state
            .names
            .get(&atom)
            .cloned()
            .ok_or(OsErrorCode::INVALID_HANDLE)?;
        let entry = state
            .atoms
            .get_mut(&name)
            .ok_or(OsErrorCode::INVALID_HANDLE)?;

        entry.refs -= 1;
        if entry.refs == 0 {
            state.atoms.remove(&name);
            state.names.remove(&atom);
        }
        Ok(())
    }

    fn register_hotkey(
        &self,
        owner: WindowHandle,
        id: AtomId,
        modifiers: Modifiers,
        key: VirtualKey,
    ) -> Result<bool, OsErrorCode> {
        let mut state = self.state.lock();
        state.register_calls += 1;

        if std::mem::take(&mut state.decline_next) {
            return Ok(false);
        }

        let chord = modifiers.chord();
        let taken = state.external.contains(&(chord, key))
            || state.bindings.contains_key(&(owner, id))
            || state
                .bindings
                .iter()
                .any(|((window, _), bound)| {
                    *window == owner && bound.chord == chord && bound.key == key
                });
        if taken {
            return Err(OsErrorCode::HOTKEY_ALREADY_REGISTERED);
        }

        state.bindings.insert((owner, id), BoundKey { chord, key });
        Ok(true)
    }

    fn unregister_hotkey(&self, owner: WindowHandle, id: AtomId) -> Result<(), OsErrorCode> {
        let mut state = self.state.lock();
        state.unregister_calls += 1;

        state
            .bindings
            .remove(&(owner, id))
            .map(|_| ())
            .ok_or(OsErrorCode::HOTKEY_NOT_REGISTERED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: WindowHandle = WindowHandle(0x10);

    fn ctrl_f9() -> HotKey {
        HotKey::new(VirtualKey::F9, Modifiers::CONTROL)
    }

    #[test]
    fn test_atoms_are_reference_counted() {
        let api = SimulatedApi::new();

        let first = api.add_atom("HotKey#1").unwrap();
        let second = api.add_atom("HotKey#1").unwrap();
        assert_eq!(first, second);
        assert_eq!(api.atom_refs(first), 2);
        assert_eq!(api.atom_count(), 1);

        api.delete_atom(first).unwrap();
        assert_eq!(api.atom_refs(first), 1);
        api.delete_atom(first).unwrap();
        assert_eq!(api.atom_count(), 0);

        assert_eq!(api.delete_atom(first), Err(OsErrorCode::INVALID_HANDLE));
    }

    #[test]
    fn test_atom_table_exhaustion() {
        let api = SimulatedApi::with_capacity(1);
        api.add_atom("a").unwrap();
        assert_eq!(api.add_atom("b"), Err(OsErrorCode::NOT_ENOUGH_MEMORY));
        // Existing names still resolve.
        assert!(api.add_atom("a").is_ok());
    }

    #[test]
    fn test_string_atoms_start_at_c000() {
        let api = SimulatedApi::new();
        assert_eq!(api.add_atom("x").unwrap().get(), 0xC000);
        assert_eq!(api.add_atom("y").unwrap().get(), 0xC001);
    }

    #[test]
    fn test_duplicate_binding_rejected() {
        let api = SimulatedApi::new();
        let a = api.add_atom("a").unwrap();
        let b = api.add_atom("b").unwrap();

        assert_eq!(
            api.register_hotkey(OWNER, a, Modifiers::CONTROL, VirtualKey::F9),
            Ok(true)
        );
        // Same combination, same owner, different id.
        let mods = Modifiers::CONTROL | Modifiers::NO_REPEAT;
        assert_eq!(
            api.register_hotkey(OWNER, b, mods, VirtualKey::F9),
            Err(OsErrorCode::HOTKEY_ALREADY_REGISTERED)
        );
        // Same combination on another owner is a different triple.
        assert_eq!(
            api.register_hotkey(WindowHandle(0x20), b, Modifiers::CONTROL, VirtualKey::F9),
            Ok(true)
        );
        assert_eq!(api.binding_count(), 2);
    }

    #[test]
    fn test_external_reservation() {
        let api = SimulatedApi::new();
        api.reserve_external(ctrl_f9());
        let id = api.add_atom("a").unwrap();

        assert_eq!(
            api.register_hotkey(OWNER, id, Modifiers::CONTROL, VirtualKey::F9),
            Err(OsErrorCode::HOTKEY_ALREADY_REGISTERED)
        );
    }

    #[test]
    fn test_decline_next_registration() {
        let api = SimulatedApi::new();
        let id = api.add_atom("a").unwrap();

        api.decline_next_registration();
        assert_eq!(
            api.register_hotkey(OWNER, id, Modifiers::CONTROL, VirtualKey::F9),
            Ok(false)
        );
        assert_eq!(
            api.register_hotkey(OWNER, id, Modifiers::CONTROL, VirtualKey::F9),
            Ok(true)
        );
        assert_eq!(api.register_calls(), 2);
    }

    #[test]
    fn test_unregister_unknown() {
        let api = SimulatedApi::new();
        let id = api.add_atom("a").unwrap();
        assert_eq!(
            api.unregister_hotkey(OWNER, id),
            Err(OsErrorCode::HOTKEY_NOT_REGISTERED)
        );
        assert_eq!(api.unregister_calls(), 1);
    }

    #[test]
    fn test_press_produces_message_for_bound_combination() {
        let api = SimulatedApi::new();
        let id = api.add_atom("a").unwrap();
        api.register_hotkey(OWNER, id, Modifiers::CONTROL, VirtualKey::F9)
            .unwrap();

        let message = api.press(OWNER, ctrl_f9()).unwrap();
        assert_eq!(message, Message::hotkey(OWNER, id, ctrl_f9()));

        assert!(api.press(WindowHandle(0x20), ctrl_f9()).is_none());
        assert!(api
            .press(OWNER, HotKey::new(VirtualKey::F9, Modifiers::ALT))
            .is_none());

        api.unregister_hotkey(OWNER, id).unwrap();
        assert!(api.press(OWNER, ctrl_f9()).is_none());
    }
}
