//! The execution environment: storage areas plus the change hub.

use std::cell::RefCell;
use std::rc::Rc;

use stowage_area::{AreaKind, MemoryArea, StorageArea};

use crate::{ChangeHub, ChangeNotice};

/// A shared handle to one storage area.
///
/// Areas are shared by every binding in the environment, so they live behind
/// `Rc<RefCell<_>>` like the rest of this single-threaded stack.
pub type AreaHandle = Rc<RefCell<dyn StorageArea>>;

/// Wrap a concrete area into an [`AreaHandle`].
pub fn area_handle(area: impl StorageArea + 'static) -> AreaHandle {
    Rc::new(RefCell::new(area))
}

/// What one execution context provides: up to two storage areas and the
/// change hub that keeps their consumers converged.
///
/// An environment without areas is the expected degraded mode for
/// non-interactive execution contexts: reads fall back to initial values and
/// writes are warn-and-no-op, see [`Environment::headless`].
pub struct Environment {
    persistent: Option<AreaHandle>,
    session: Option<AreaHandle>,
    hub: ChangeHub,
}

impl Environment {
    /// Build an environment from whatever areas the host managed to obtain.
    pub fn with_areas(persistent: Option<AreaHandle>, session: Option<AreaHandle>) -> Self {
        Self {
            persistent,
            session,
            hub: ChangeHub::new(),
        }
    }

    /// An environment with two fresh in-process areas.
    ///
    /// For tests and hosts without a browser surface.
    pub fn in_memory() -> Self {
        Self::with_areas(
            Some(area_handle(MemoryArea::new())),
            Some(area_handle(MemoryArea::new())),
        )
    }

    /// An environment with no storage areas at all.
    pub fn headless() -> Self {
        Self::with_areas(None, None)
    }

    /// The storage area of the given kind, when this environment has one.
    pub fn area(&self, kind: AreaKind) -> Option<&AreaHandle> {
        match kind {
            AreaKind::Persistent => self.persistent.as_ref(),
            AreaKind::Session => self.session.as_ref(),
        }
    }

    /// The change hub shared by every binding in this environment.
    pub fn hub(&self) -> &ChangeHub {
        &self.hub
    }

    /// Relay the platform's native cross-document storage notification.
    ///
    /// Hosts call this when another same-origin document writes to a shared
    /// area; the notice is broadcast keyed, so only bindings on `key`
    /// re-read.
    pub fn relay_remote_change(
        &self,
        kind: AreaKind,
        key: impl Into<String>,
        old: Option<String>,
        new: Option<String>,
    ) {
        let key = key.into();
        log::debug!("relaying remote change to {} key {:?}", kind, key);
        self.hub
            .broadcast(&ChangeNotice::Remote { kind, key, old, new });
    }
}
