//! Mutex-guarded device state store.
//!
//! One [`StateStore`] instance owns the mutable state record of a
//! controlled subsystem. It replaces the ambient `g_status`-style globals
//! of classic firmware: the store is constructed once at boot and handed
//! to every task by cloned handle.
//!
//! Contract:
//! - [`snapshot`](StateStore::snapshot) returns a copy; readers never hold
//!   the lock beyond the copy.
//! - [`write`](StateStore::write) runs a mutator under the exclusive lock.
//!   All cross-field invariants (range clamps, mode gating) live inside
//!   the mutators defined by the domain handles, never in callers.
//! - No I/O, no queue sends, no flag raises under the lock. The store
//!   itself raises no flags — the caller does, after a successful write.

use std::sync::{Arc, Mutex};

/// Result of a gated/validated store mutation.
///
/// Callers use this to decide whether to raise event flags and enqueue
/// telemetry: only `Applied` warrants either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum WriteOutcome {
    /// The mutation was accepted and changed state.
    Applied,
    /// The mutation was valid but produced no change.
    Unchanged,
    /// The mutation was rejected (range check or authority gate).
    Rejected,
}

impl WriteOutcome {
    pub fn applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Shared handle to a subsystem's mutable state record.
pub struct StateStore<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for StateStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Copy> StateStore<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    /// Copy of the current state. The lock is held only for the copy.
    pub fn snapshot(&self) -> T {
        *self.inner.lock().expect("state store mutex poisoned")
    }

    /// Run `mutator` under the exclusive lock.
    ///
    /// The mutator must be pure state manipulation — an unavailable store
    /// mutex is a fatal design violation, not a runtime condition, so no
    /// timeout is used here.
    pub fn write<R>(&self, mutator: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock().expect("state store mutex poisoned");
        mutator(&mut guard)
    }
}
