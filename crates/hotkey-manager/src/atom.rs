//! Identifier allocation through the global name table.
//!
//! A hotkey's id is the atom for a name derived from its shortcut identity,
//! so allocation never collides within the process. Each `allocate` must be
//! paired with exactly one `release`.

use std::sync::Arc;

use hotkey_core::{AtomId, HotKey, HotKeyError};

use crate::platform::HotKeyApi;

/// Name under which `hotkey`'s identifier is allocated.
pub fn atom_name(hotkey: &HotKey) -> String {
    format!("HotKey#{}", hotkey.identity_hash())
}

/// Allocates and releases hotkey identifiers.
#[derive(Clone)]
pub struct IdentifierAllocator {
    api: Arc<dyn HotKeyApi>,
}

impl IdentifierAllocator {
    pub fn new(api: Arc<dyn HotKeyApi>) -> Self {
        Self { api }
    }

    /// Allocate an identifier for `hotkey`.
    pub fn allocate(&self, hotkey: &HotKey) -> Result<AtomId, HotKeyError> {
        let name = atom_name(hotkey);
        let atom = self
            .api
            .add_atom(&name)
            .map_err(|code| HotKeyError::Allocation {
                hotkey: *hotkey,
                code,
            })?;
        tracing::debug!("Allocated identifier {} for {} ({})", atom, hotkey, name);
        Ok(atom)
    }

    /// Release a previously allocated identifier.
    pub fn release(&self, atom: AtomId) -> Result<(), HotKeyError> {
        self.api
            .delete_atom(atom)
            .map_err(|code| HotKeyError::Release { atom, code })?;
        tracing::debug!("Released identifier {}", atom);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{MockHotKeyApi, SimulatedApi};
    use hotkey_core::{Modifiers, OsErrorCode, VirtualKey};

    fn ctrl_f9() -> HotKey {
        HotKey::new(VirtualKey::F9, Modifiers::CONTROL)
    }

    #[test]
    fn test_atom_name_follows_identity() {
        let hotkey = ctrl_f9();
        assert_eq!(atom_name(&hotkey), format!("HotKey#{}", (0x78 * 397) ^ 2));
        assert_ne!(atom_name(&hotkey), atom_name(&hotkey.no_repeat()));
    }

    #[test]
    fn test_allocate_and_release() {
        let api = Arc::new(SimulatedApi::new());
        let allocator = IdentifierAllocator::new(api.clone());

        let atom = allocator.allocate(&ctrl_f9()).unwrap();
        assert_eq!(api.atom_refs(atom), 1);

        allocator.release(atom).unwrap();
        assert_eq!(api.atom_count(), 0);
    }

    #[test]
    fn test_allocation_error_carries_code() {
        let expected = atom_name(&ctrl_f9());
        let mut api = MockHotKeyApi::new();
        api.expect_add_atom()
            .withf(move |name| name == expected)
            .times(1)
            .returning(|_| Err(OsErrorCode::NOT_ENOUGH_MEMORY));
        let allocator = IdentifierAllocator::new(Arc::new(api));

        assert_eq!(
            allocator.allocate(&ctrl_f9()),
            Err(HotKeyError::Allocation {
                hotkey: ctrl_f9(),
                code: OsErrorCode::NOT_ENOUGH_MEMORY
            })
        );
    }

    #[test]
    fn test_double_release_fails() {
        let api = Arc::new(SimulatedApi::new());
        let allocator = IdentifierAllocator::new(api);

        let atom = allocator.allocate(&ctrl_f9()).unwrap();
        allocator.release(atom).unwrap();
        assert_eq!(
            allocator.release(atom),
            Err(HotKeyError::Release {
                atom,
                code: OsErrorCode::INVALID_HANDLE
            })
        );
    }
}
