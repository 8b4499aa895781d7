//! Coordinator Lock Module
//!
//! The per-cache reader-writer lock, with a switch so single-threaded
//! configurations skip acquisition entirely.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

// == Op Lock ==
/// Reader-writer lock guarding every coordinator operation.
///
/// Read-only operations take it shared, mutating operations exclusive. When
/// built with `enabled = false` the guards are `None` and no lock is touched;
/// the caller has promised to serialize all access externally.
///
/// Non-reentrant: store and policy implementations invoked under this lock
/// must not call back into the coordinator.
#[derive(Debug)]
pub(crate) struct OpLock {
    inner: RwLock<()>,
    enabled: bool,
}

impl OpLock {
    // == Constructor ==
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            inner: RwLock::new(()),
            enabled,
        }
    }

    // == Shared ==
    /// Acquires the lock in shared mode; `None` when locking is disabled.
    pub(crate) fn read(&self) -> Option<RwLockReadGuard<'_, ()>> {
        self.enabled.then(|| self.inner.read())
    }

    // == Exclusive ==
    /// Acquires the lock in exclusive mode; `None` when locking is disabled.
    pub(crate) fn write(&self) -> Option<RwLockWriteGuard<'_, ()>> {
        self.enabled.then(|| self.inner.write())
    }
}
