//! The observable cell.
//!
//! A [`ValueCell`] is the in-memory mirror of the last successfully read or
//! written value for one binding. The UI collaborator subscribes to it and
//! re-renders when it changes; this module only guarantees the cell updates
//! and watchers fire.
//!
//! # Invariants
//!
//! 1. `get()` always returns the value of the most recent `set()`.
//! 2. Watchers are notified in registration order.
//! 3. Dropping a [`CellSubscription`] removes the watcher before the next
//!    notification cycle; dropping it twice is harmless.
//! 4. Watchers may call `get()`/`with()` or subscribe during notification;
//!    the dispatch runs over a snapshot of the watcher list.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// A shared, single-threaded cell with change notification.
///
/// Cloning a `ValueCell` clones the handle, not the value: all clones see
/// the same state, in the same way shared observables do in reactive UI
/// runtimes.
pub struct ValueCell<T> {
    inner: Rc<RefCell<CellInner<T>>>,
}

struct CellInner<T> {
    value: T,
    next_id: u64,
    watchers: Vec<(u64, Rc<dyn Fn(&T)>)>,
}

impl<T> Clone for ValueCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueCell")
            .field("value", &self.inner.borrow().value)
            .finish()
    }
}

impl<T: Clone + 'static> ValueCell<T> {
    /// Create a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CellInner {
                value,
                next_id: 0,
                watchers: Vec::new(),
            })),
        }
    }

    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Borrow the current value without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify every watcher.
    pub fn set(&self, value: T) {
        let watchers: Vec<Rc<dyn Fn(&T)>> = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            inner.watchers.iter().map(|(_, w)| Rc::clone(w)).collect()
        };
        for watcher in watchers {
            watcher(&value);
        }
    }

    /// Register a watcher called on every `set()`.
    ///
    /// The watcher stays registered until the returned guard is dropped.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> CellSubscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.watchers.push((id, Rc::new(f)));
            id
        };
        let weak: Weak<RefCell<CellInner<T>>> = Rc::downgrade(&self.inner);
        CellSubscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().watchers.retain(|(wid, _)| *wid != id);
                }
            })),
        }
    }

    /// Number of registered watchers.
    pub fn watcher_count(&self) -> usize {
        self.inner.borrow().watchers.len()
    }
}

/// RAII guard for a [`ValueCell`] watcher.
///
/// Dropping the guard deregisters the watcher. Deregistration is idempotent
/// and survives the cell being dropped first.
pub struct CellSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Drop for CellSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for CellSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellSubscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
