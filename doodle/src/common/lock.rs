use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use std::sync::Arc;

/// A shareable handle to the read-write lock guarding one store location.
///
/// Every operation on a store holds the guard for its whole
/// load-modify-save cycle, so two handles on the same location never
/// interleave their reads and writes.
#[derive(Clone)]
pub struct LockHandle {
    lock: Arc<RwLock<()>>,
}

impl LockHandle {
    /// Creates a lock handle that is not shared with any registry.
    pub fn new() -> Self {
        LockHandle {
            lock: Arc::new(RwLock::new(())),
        }
    }

    /// Acquires a read lock
    pub fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read()
    }

    /// Acquires a write lock
    pub fn write(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write()
    }

    /// Returns `true` if both handles guard the same location.
    pub fn same_lock(&self, other: &LockHandle) -> bool {
        Arc::ptr_eq(&self.lock, &other.lock)
    }
}

impl Default for LockHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of read-write locks keyed by store location.
///
/// The process keeps one registry for all `Doodle` handles; a handle
/// asks it for the lock of its absolute file path when it is opened.
/// Locks are `parking_lot` locks and are never poisoned.
///
/// # Examples
///
/// ```
/// use doodle::common::LockRegistry;
///
/// let registry = LockRegistry::new();
/// let first = registry.get_lock("/tmp/store.json");
/// let second = registry.get_lock("/tmp/store.json");
/// assert!(first.same_lock(&second));
/// {
///     let _write_guard = first.write();
/// } // Write lock is held while _write_guard is in scope
/// ```
#[derive(Clone)]
pub struct LockRegistry {
    locks: Arc<RwLock<HashMap<String, Arc<RwLock<()>>>>>,
}

impl LockRegistry {
    /// Creates a new empty lock registry.
    pub fn new() -> Self {
        LockRegistry {
            locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Gets the lock for the given location, creating it on first use.
    pub fn get_lock(&self, location: &str) -> LockHandle {
        let lock = {
            let mut locks = self.locks.write();
            locks
                .entry(location.to_string())
                .or_insert_with(|| Arc::new(RwLock::new(())))
                .clone()
        };
        LockHandle { lock }
    }

    /// Returns the number of locks currently registered.
    pub fn lock_count(&self) -> usize {
        let locks = self.locks.read();
        locks.len()
    }
}

impl Default for LockRegistry {
    fn default() -> Self {
        Self::new()
    }
}
