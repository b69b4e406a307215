//! Thread-safe handle to a [`Store`].
//!
//! The whole store sits behind one reader-writer lock. Each mutation touches
//! several indexes, so the lock is held for the entire operation; readers run
//! concurrently with each other but never observe a write in progress.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::store::Store;

/// Cloneable, lock-guarded [`Store`].
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` under the shared lock.
    pub fn read<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&*self.inner.read())
    }

    /// Run `f` under the exclusive lock. Group related mutations into one
    /// call to make them indivisible to other callers.
    pub fn write<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut *self.inner.write())
    }
}

impl From<Store> for SharedStore {
    fn from(store: Store) -> Self {
        Self::new(store)
    }
}
