//! Storage strategies for setting values.

use crossbeam::atomic::AtomicCell;
use parking_lot::RwLock;

/// Storage for the current value of a setting.
///
/// Implementations must be safe under concurrent `load` calls; `store` is
/// only expected to race with readers, never with other writers.
pub trait SettingCell<T>: Send + Sync {
    /// Read the current value.
    fn load(&self) -> T;

    /// Replace the current value.
    fn store(&self, value: T);
}

/// Reader-writer lock around the value; each read clones it.
#[derive(Debug, Default)]
pub struct LockedCell<T> {
    inner: RwLock<T>,
}

impl<T> LockedCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: RwLock::new(value),
        }
    }
}

impl<T: Clone + Send + Sync> SettingCell<T> for LockedCell<T> {
    #[inline]
    fn load(&self) -> T {
        self.inner.read().clone()
    }

    fn store(&self, value: T) {
        *self.inner.write() = value;
    }
}

/// Atomic storage for small `Copy` values.
///
/// Lock-free when the platform has an atomic of the value's width; see
/// [`LockFreeCell::is_lock_free`].
#[derive(Default)]
pub struct LockFreeCell<T> {
    inner: AtomicCell<T>,
}

impl<T> LockFreeCell<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: AtomicCell::new(value),
        }
    }

    /// Whether loads and stores compile to plain atomic instructions.
    pub fn is_lock_free() -> bool {
        AtomicCell::<T>::is_lock_free()
    }
}

impl<T: Copy + Send> SettingCell<T> for LockFreeCell<T> {
    #[inline]
    fn load(&self) -> T {
        self.inner.load()
    }

    fn store(&self, value: T) {
        self.inner.store(value);
    }
}
