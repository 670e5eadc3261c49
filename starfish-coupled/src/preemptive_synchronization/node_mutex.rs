//! The lock embedded in every list node.
//!
//! Normally a `parking_lot::Mutex`: it does not poison, so a callback that
//! panics mid-traversal leaves every lock it unwound through usable. With the
//! `shuttle` feature the lock is `shuttle::sync::Mutex`, which lets shuttle
//! pick the interleavings of node acquisitions; poisoning is ignored there for
//! the same reason.

use std::ops::{Deref, DerefMut};

use super::lock_audit::LockAudit;

#[cfg(not(feature = "shuttle"))]
type RawMutex<T> = parking_lot::Mutex<T>;
#[cfg(not(feature = "shuttle"))]
type RawGuard<'a, T> = parking_lot::MutexGuard<'a, T>;

#[cfg(feature = "shuttle")]
type RawMutex<T> = shuttle::sync::Mutex<T>;
#[cfg(feature = "shuttle")]
type RawGuard<'a, T> = shuttle::sync::MutexGuard<'a, T>;

pub(crate) struct NodeMutex<T> {
    inner: RawMutex<T>,
}

impl<T> NodeMutex<T> {
    pub(crate) fn new(value: T) -> Self {
        NodeMutex {
            inner: RawMutex::new(value),
        }
    }

    /// Blocks until the lock is held by the calling thread.
    #[cfg(not(feature = "shuttle"))]
    pub(crate) fn lock(&self) -> NodeGuard<'_, T> {
        let guard = self.inner.lock();
        NodeGuard {
            guard,
            _audit: LockAudit::acquire(),
        }
    }

    #[cfg(feature = "shuttle")]
    pub(crate) fn lock(&self) -> NodeGuard<'_, T> {
        let guard = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        NodeGuard {
            guard,
            _audit: LockAudit::acquire(),
        }
    }

    /// Exclusive access without locking; `&mut self` already rules out other users.
    #[cfg(not(feature = "shuttle"))]
    pub(crate) fn get_mut(&mut self) -> &mut T {
        self.inner.get_mut()
    }

    #[cfg(feature = "shuttle")]
    pub(crate) fn get_mut(&mut self) -> &mut T {
        self.inner
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// RAII guard for a [`NodeMutex`]. Unlocks on drop, including during unwinding.
pub(crate) struct NodeGuard<'a, T> {
    // Declared first so the lock is released before the audit token.
    guard: RawGuard<'a, T>,
    _audit: LockAudit,
}

impl<T> Deref for NodeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for NodeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}
