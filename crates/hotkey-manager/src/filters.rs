//! Message filter list.
//!
//! The dispatch loop hands every message to [`MessageFilters::dispatch`]
//! before its own routing. Filters run in installation order and the first
//! one to report [`FilterOutcome::Handled`] ends the walk.
//!
//! ## Re-entrancy
//!
//! `dispatch` walks a snapshot of the list, so a filter (or a callback it
//! fires) may add or remove filters, including itself, without deadlocking.
//! Changes take effect from the next message.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::message::{FilterOutcome, Message};

/// A hook that inspects dispatched messages.
pub trait MessageFilter: Send + Sync {
    /// Inspect `message`. Must not alter messages it does not recognize.
    fn pre_filter(&self, message: &Message) -> FilterOutcome;
}

/// Ordered list of installed filters.
#[derive(Default)]
pub struct MessageFilters {
    filters: RwLock<Vec<Arc<dyn MessageFilter>>>,
}

impl MessageFilters {
    /// Create an empty filter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter.
    pub fn add(&self, filter: Arc<dyn MessageFilter>) {
        self.filters.write().push(filter);
    }

    /// Remove a filter by identity.
    ///
    /// Returns `true` if it was installed.
    pub fn remove(&self, filter: &Arc<dyn MessageFilter>) -> bool {
        let mut filters = self.filters.write();
        match filters.iter().position(|f| Arc::ptr_eq(f, filter)) {
            Some(pos) => {
                filters.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Whether `filter` is installed.
    pub fn contains(&self, filter: &Arc<dyn MessageFilter>) -> bool {
        self.filters.read().iter().any(|f| Arc::ptr_eq(f, filter))
    }

    /// Number of installed filters.
    pub fn len(&self) -> usize {
        self.filters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.read().is_empty()
    }

    /// Offer `message` to each filter in order.
    pub fn dispatch(&self, message: &Message) -> FilterOutcome {
        let snapshot: Vec<_> = self.filters.read().iter().cloned().collect();

        for filter in snapshot {
            if filter.pre_filter(message).is_handled() {
                return FilterOutcome::Handled;
            }
        }

        FilterOutcome::Pass
    }
}
