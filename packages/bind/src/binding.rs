//! The storage binding: read, write, and cross-consumer synchronization for
//! one `(storage area, key)` pair.

use std::cell::Cell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use stowage_area::AreaKind;
use stowage_schema::Validator;

use crate::cell::{CellSubscription, ValueCell};
use crate::codec;
use crate::env::Environment;
use crate::notify::{ChangeNotice, HubSubscription};
use crate::update::Update;

/// A shared validator handle, as carried by a [`StorageConfig`].
pub type Schema<T> = Rc<dyn Validator<T>>;

/// Configuration for one binding.
///
/// Captured at creation and immutable for the binding's lifetime.
pub struct StorageConfig<T> {
    /// Storage slot identifier. Unique per storage area.
    pub key: String,
    /// Default and fallback value; also defines the target type when no
    /// schema is given.
    pub initial: T,
    /// Optional validator narrowing the decoded value.
    pub schema: Option<Schema<T>>,
    /// When true, a storage-access failure during read self-heals the entry
    /// by writing the encoded initial value back immediately.
    pub replace: bool,
}

impl<T> StorageConfig<T> {
    /// Configuration for `key` with the given fallback value.
    ///
    /// # Panics
    ///
    /// Panics when `key` is empty - that is a configuration bug, detected
    /// as early as possible.
    pub fn new(key: impl Into<String>, initial: T) -> Self {
        let key = key.into();
        assert!(!key.is_empty(), "storage key must be non-empty");
        Self {
            key,
            initial,
            schema: None,
            replace: false,
        }
    }

    /// Validate decoded entries through `schema`.
    pub fn with_schema(mut self, schema: impl Validator<T> + 'static) -> Self {
        self.schema = Some(Rc::new(schema));
        self
    }

    /// Self-heal broken entries on read failure.
    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }
}

/// A typed, schema-validated accessor over one key in one storage area.
///
/// A binding owns an observable cell mirroring the last successfully read or
/// written value, and keeps it converged with every other binding on the
/// same key - in this document through the environment's change hub, across
/// documents through the relayed native notification.
///
/// Consumers never receive an error from normal read/write usage: every
/// failure mode degrades to the configured initial value plus a diagnostic
/// log line. The single exception is a validator matching none of the
/// recognized calling conventions, which panics at decode time.
///
/// Dropping the binding deregisters its hub subscription; any
/// [`Setter`] handles keep the write path alive independently.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use stowage_bind::{Binding, Environment, StorageConfig};
///
/// let env = Rc::new(Environment::in_memory());
/// let counter = Binding::persistent(&env, StorageConfig::new("counter", 0u32));
///
/// counter.update(|n| n + 1);
/// assert_eq!(counter.get(), 1);
/// ```
pub struct Binding<T> {
    inner: Rc<BindingInner<T>>,
    _watch: HubSubscription,
}

struct BindingInner<T> {
    env: Rc<Environment>,
    kind: AreaKind,
    key: String,
    initial: T,
    schema: Option<Schema<T>>,
    replace: bool,
    cell: ValueCell<T>,
    // Guards against a notification re-entering the read pass that emitted
    // it (a replace self-heal broadcasts mid-read).
    refreshing: Cell<bool>,
}

impl<T> Binding<T>
where
    T: Clone + Serialize + DeserializeOwned + 'static,
{
    /// Bind `config` to the given storage area of `env`.
    ///
    /// Seeds the cell synchronously: from storage when the environment has
    /// the area, from the initial value otherwise. Immediately after
    /// subscribing to change notices, one additional read-and-reseed pass
    /// reconciles anything that changed in between; this is a one-time
    /// transition, not a poll.
    pub fn bind(env: &Rc<Environment>, kind: AreaKind, config: StorageConfig<T>) -> Self {
        let StorageConfig {
            key,
            initial,
            schema,
            replace,
        } = config;

        let inner = Rc::new(BindingInner {
            env: Rc::clone(env),
            kind,
            key,
            initial: initial.clone(),
            schema,
            replace,
            cell: ValueCell::new(initial),
            refreshing: Cell::new(false),
        });

        inner.refresh();

        let weak = Rc::downgrade(&inner);
        let watch = env.hub().subscribe(move |notice| {
            if let Some(inner) = weak.upgrade() {
                inner.on_notice(notice);
            }
        });

        inner.refresh();

        Binding {
            inner,
            _watch: watch,
        }
    }

    /// Bind to the persistent area.
    pub fn persistent(env: &Rc<Environment>, config: StorageConfig<T>) -> Self {
        Self::bind(env, AreaKind::Persistent, config)
    }

    /// Bind to the session area.
    pub fn session(env: &Rc<Environment>, config: StorageConfig<T>) -> Self {
        Self::bind(env, AreaKind::Session, config)
    }

    /// The bound key.
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// The bound storage area.
    pub fn kind(&self) -> AreaKind {
        self.inner.kind
    }

    /// The current value.
    pub fn get(&self) -> T {
        self.inner.cell.get()
    }

    /// Watch the observable cell.
    ///
    /// The watcher fires on every cell update - successful reads and writes
    /// both - until the returned guard is dropped.
    pub fn watch(&self, f: impl Fn(&T) + 'static) -> CellSubscription {
        self.inner.cell.subscribe(f)
    }

    /// Apply an update: persist, mirror into the cell, broadcast.
    pub fn apply(&self, update: Update<T>) {
        self.inner.apply(update);
    }

    /// Set a literal replacement value.
    pub fn set(&self, value: T) {
        self.inner.apply(Update::Literal(value));
    }

    /// Set via a function of the current value.
    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.inner.apply(Update::updater(f));
    }

    /// A cloneable write handle.
    pub fn setter(&self) -> Setter<T> {
        Setter {
            inner: Rc::clone(&self.inner),
        }
    }

    /// The `(current value, setter)` pair owed to the UI collaborator.
    pub fn pair(&self) -> (T, Setter<T>) {
        (self.get(), self.setter())
    }
}

impl<T> BindingInner<T>
where
    T: Clone + Serialize + DeserializeOwned + 'static,
{
    fn on_notice(&self, notice: &ChangeNotice) {
        if notice.kind() != self.kind {
            return;
        }
        // Remote notices are keyed and filtered; local notices are not.
        if let Some(key) = notice.key() {
            if key != self.key {
                return;
            }
        }
        self.refresh();
    }

    /// The read path: look up, decode, fall back, mirror into the cell.
    fn refresh(&self) {
        let Some(area) = self.env.area(self.kind) else {
            return;
        };
        if self.refreshing.replace(true) {
            return;
        }

        let looked_up = area.borrow_mut().get_item(&self.key);
        let value = match looked_up {
            Ok(Some(text)) => codec::decode(&text, self.schema.as_deref())
                .unwrap_or_else(|| self.initial.clone()),
            Ok(None) => self.initial.clone(),
            Err(err) => {
                log::warn!("reading {} key {:?} failed: {}", self.kind, self.key, err);
                if self.replace {
                    self.heal();
                }
                self.initial.clone()
            }
        };

        self.cell.set(value);
        self.refreshing.set(false);
    }

    /// Write the encoded initial value back over a broken entry.
    fn heal(&self) {
        let Some(area) = self.env.area(self.kind) else {
            return;
        };
        let text = match codec::encode(&self.initial) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("cannot encode fallback for key {:?}: {}", self.key, err);
                return;
            }
        };
        if let Err(err) = area.borrow_mut().set_item(&self.key, &text) {
            log::warn!("self-heal write for key {:?} failed: {}", self.key, err);
            return;
        }
        log::debug!("self-healed {} key {:?}", self.kind, self.key);
        self.env.hub().broadcast(&ChangeNotice::Local { kind: self.kind });
    }

    /// The write path: resolve, encode, persist, mirror, broadcast.
    ///
    /// The cell update and the broadcast only happen once the storage write
    /// succeeded; on any failure the prior state stays untouched.
    fn apply(&self, update: Update<T>) {
        let Some(area) = self.env.area(self.kind) else {
            log::warn!(
                "no {} storage area in this environment; set for key {:?} is a no-op",
                self.kind,
                self.key
            );
            return;
        };

        let current = self.cell.get();
        let next = update.resolve(&current);

        let text = match codec::encode(&next) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("writing {} key {:?} failed: {}", self.kind, self.key, err);
                return;
            }
        };
        if let Err(err) = area.borrow_mut().set_item(&self.key, &text) {
            log::warn!(
                "writing {} key {:?} failed; keeping previous value: {}",
                self.kind,
                self.key,
                err
            );
            return;
        }
        log::debug!("wrote {} bytes to {} key {:?}", text.len(), self.kind, self.key);

        self.cell.set(next);
        self.env.hub().broadcast(&ChangeNotice::Local { kind: self.kind });
    }
}

/// A cloneable write handle to a binding.
///
/// Setters share the binding's cell and configuration; they stay usable
/// after the owning [`Binding`] is dropped.
pub struct Setter<T> {
    inner: Rc<BindingInner<T>>,
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Setter<T>
where
    T: Clone + Serialize + DeserializeOwned + 'static,
{
    /// Apply an update through the owning binding's write path.
    pub fn apply(&self, update: Update<T>) {
        self.inner.apply(update);
    }

    /// Set a literal replacement value.
    pub fn set(&self, value: T) {
        self.inner.apply(Update::Literal(value));
    }

    /// Set via a function of the current value.
    pub fn update(&self, f: impl FnOnce(&T) -> T + 'static) {
        self.inner.apply(Update::updater(f));
    }
}
