//! The cross-consumer change hub.
//!
//! One hub per execution environment. Every binding subscribes to it; every
//! successful write broadcasts on it. Notices come in two flavors with a
//! deliberate asymmetry:
//!
//! - [`ChangeNotice::Local`] - produced after a same-document write. It is
//!   area-tagged but carries NO key, and receivers do not filter it: every
//!   binding for that area re-reads on any local write to any key.
//! - [`ChangeNotice::Remote`] - the platform's native cross-document
//!   notification, relayed through [`Environment`]. It carries the changed
//!   key, and a binding whose key differs short-circuits without re-reading.
//!
//! The asymmetry is intentional; do not "fix" it by filtering local notices.
//!
//! # Invariants
//!
//! 1. Broadcast happens strictly after the storage write it reports
//!    (write-then-notify; single-threaded, so never reordered).
//! 2. Subscribers are notified in registration order.
//! 3. Dispatch runs over a snapshot of the subscriber list, so callbacks may
//!    broadcast, subscribe, or unsubscribe re-entrantly.
//! 4. Dropping a [`HubSubscription`] deregisters it; doing so twice is
//!    harmless.
//!
//! [`Environment`]: crate::Environment

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use stowage_area::AreaKind;

/// A change observed on a storage area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeNotice {
    /// A write performed in this document. Carries no key.
    Local {
        /// Which storage area was written.
        kind: AreaKind,
    },

    /// A write performed in another same-origin document, relayed from the
    /// platform's native storage notification.
    Remote {
        /// Which storage area was written.
        kind: AreaKind,
        /// The key that changed.
        key: String,
        /// The entry text before the change, when the platform reports it.
        old: Option<String>,
        /// The entry text after the change, when the platform reports it.
        new: Option<String>,
    },
}

impl ChangeNotice {
    /// The storage area this notice is about.
    pub fn kind(&self) -> AreaKind {
        match self {
            ChangeNotice::Local { kind } => *kind,
            ChangeNotice::Remote { kind, .. } => *kind,
        }
    }

    /// The changed key, when the notice carries one.
    ///
    /// Local notices never do.
    pub fn key(&self) -> Option<&str> {
        match self {
            ChangeNotice::Local { .. } => None,
            ChangeNotice::Remote { key, .. } => Some(key),
        }
    }
}

/// The process-wide broadcast channel for change notices.
///
/// Cloning a `ChangeHub` clones the handle; all clones share one subscriber
/// registry. The hub has explicit lifecycle: it is constructed with its
/// [`Environment`](crate::Environment) and lives as long as it does - there
/// is no ambient global registry.
pub struct ChangeHub {
    inner: Rc<RefCell<HubInner>>,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    subscribers: Vec<(u64, Rc<dyn Fn(&ChangeNotice)>)>,
}

impl Clone for ChangeHub {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeHub {
    /// Create a hub with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(HubInner::default())),
        }
    }

    /// Register a subscriber called on every broadcast.
    pub fn subscribe(&self, f: impl Fn(&ChangeNotice) + 'static) -> HubSubscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::new(f)));
            id
        };
        let weak: Weak<RefCell<HubInner>> = Rc::downgrade(&self.inner);
        HubSubscription {
            cancel: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
                }
            })),
        }
    }

    /// Deliver `notice` to every subscriber.
    pub fn broadcast(&self, notice: &ChangeNotice) {
        let subscribers: Vec<Rc<dyn Fn(&ChangeNotice)>> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(_, s)| Rc::clone(s))
            .collect();
        for subscriber in subscribers {
            subscriber(notice);
        }
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// RAII guard for a [`ChangeHub`] subscriber.
pub struct HubSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Drop for HubSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for HubSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSubscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn broadcast_reaches_all_subscribers() {
        let hub = ChangeHub::new();
        let count = Rc::new(Cell::new(0));

        let c1 = Rc::clone(&count);
        let _s1 = hub.subscribe(move |_| c1.set(c1.get() + 1));
        let c2 = Rc::clone(&count);
        let _s2 = hub.subscribe(move |_| c2.set(c2.get() + 1));

        hub.broadcast(&ChangeNotice::Local {
            kind: AreaKind::Persistent,
        });
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn drop_deregisters() {
        let hub = ChangeHub::new();
        let count = Rc::new(Cell::new(0));

        let c = Rc::clone(&count);
        let sub = hub.subscribe(move |_| c.set(c.get() + 1));
        assert_eq!(hub.subscriber_count(), 1);

        drop(sub);
        assert_eq!(hub.subscriber_count(), 0);

        hub.broadcast(&ChangeNotice::Local {
            kind: AreaKind::Session,
        });
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn clones_share_the_registry() {
        let hub = ChangeHub::new();
        let other = hub.clone();
        let seen = Rc::new(Cell::new(false));

        let s = Rc::clone(&seen);
        let _sub = hub.subscribe(move |_| s.set(true));

        other.broadcast(&ChangeNotice::Local {
            kind: AreaKind::Persistent,
        });
        assert!(seen.get());
    }

    #[test]
    fn subscriber_may_broadcast_reentrantly() {
        let hub = ChangeHub::new();
        let depth = Rc::new(Cell::new(0));

        let d = Rc::clone(&depth);
        let inner_hub = hub.clone();
        let _sub = hub.subscribe(move |notice| {
            if notice.kind() == AreaKind::Persistent && d.get() == 0 {
                d.set(1);
                inner_hub.broadcast(&ChangeNotice::Local {
                    kind: AreaKind::Session,
                });
            }
        });

        hub.broadcast(&ChangeNotice::Local {
            kind: AreaKind::Persistent,
        });
        assert_eq!(depth.get(), 1);
    }

    #[test]
    fn notice_accessors() {
        let local = ChangeNotice::Local {
            kind: AreaKind::Session,
        };
        assert_eq!(local.kind(), AreaKind::Session);
        assert_eq!(local.key(), None);

        let remote = ChangeNotice::Remote {
            kind: AreaKind::Persistent,
            key: "theme".to_string(),
            old: None,
            new: Some("\"dark\"".to_string()),
        };
        assert_eq!(remote.kind(), AreaKind::Persistent);
        assert_eq!(remote.key(), Some("theme"));
    }
}
