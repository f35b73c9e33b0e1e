//! web-sys adapters for the storage areas and the native event relay.

use std::rc::Rc;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage, StorageEvent, Window};

use stowage_area::{AreaError, AreaKind, StorageArea};
use stowage_bind::{area_handle, Environment};

/// A [`StorageArea`] over one of the browser's storage surfaces.
pub struct WebArea {
    storage: Storage,
}

impl WebArea {
    /// Wrap a browser storage surface.
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl StorageArea for WebArea {
    fn get_item(&mut self, key: &str) -> Result<Option<String>, AreaError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set_item(&mut self, key: &str, text: &str) -> Result<(), AreaError> {
        self.storage.set_item(key, text).map_err(js_error)
    }
}

/// Map a thrown JS value to the area taxonomy.
///
/// Storage surfaces throw `DOMException` objects; the exception name is the
/// only reliable discriminator (browsers do not report the byte limit that
/// a quota failure hit).
fn js_error(err: JsValue) -> AreaError {
    if let Some(exception) = err.dyn_ref::<DomException>() {
        return match exception.name().as_str() {
            "QuotaExceededError" => AreaError::QuotaExceeded { limit: None },
            "SecurityError" => AreaError::AccessDenied {
                message: exception.message(),
            },
            name => AreaError::Backend(format!("{}: {}", name, exception.message()).into()),
        };
    }
    let message = err.as_string().unwrap_or_else(|| format!("{:?}", err));
    AreaError::Backend(message.into())
}

/// Build an [`Environment`] from the current window's storage surfaces.
///
/// Returned shared, ready to hand to [`Binding::bind`] and
/// [`attach_storage_relay`]. Either surface may be withheld by the browser
/// (permission policy, private browsing); a missing surface simply leaves
/// that area out, and a missing window yields the headless environment.
///
/// [`Binding::bind`]: stowage_bind::Binding::bind
pub fn browser_environment() -> Rc<Environment> {
    let Some(window) = web_sys::window() else {
        return Rc::new(Environment::headless());
    };
    let persistent = window
        .local_storage()
        .ok()
        .flatten()
        .map(|storage| area_handle(WebArea::new(storage)));
    let session = window
        .session_storage()
        .ok()
        .flatten()
        .map(|storage| area_handle(WebArea::new(storage)));
    Rc::new(Environment::with_areas(persistent, session))
}

/// The registered native `storage` listener.
///
/// Dropping the relay removes the listener from the window.
pub struct StorageRelay {
    window: Window,
    closure: Closure<dyn FnMut(StorageEvent)>,
}

impl Drop for StorageRelay {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("storage", self.closure.as_ref().unchecked_ref());
    }
}

/// Listen for the native cross-document `storage` event and feed it into
/// `env`'s change hub.
///
/// The native event fires in this document when *another* same-origin
/// document writes to a shared area; it carries the changed key, so only
/// bindings on that key re-read. Events without a key (`clear()` calls) are
/// ignored - entry removal is out of scope.
///
/// Returns `None` when there is no window to listen on.
pub fn attach_storage_relay(env: Rc<Environment>) -> Option<StorageRelay> {
    let window = web_sys::window()?;

    let window_for_closure = window.clone();
    let closure = Closure::<dyn FnMut(StorageEvent)>::new(move |event: StorageEvent| {
        let Some(key) = event.key() else {
            return;
        };
        let kind = event_area_kind(&window_for_closure, &event);
        env.relay_remote_change(kind, key, event.old_value(), event.new_value());
    });

    window
        .add_event_listener_with_callback("storage", closure.as_ref().unchecked_ref())
        .ok()?;

    Some(StorageRelay { window, closure })
}

/// Which area an event belongs to, by identity of its `storageArea`.
fn event_area_kind(window: &Window, event: &StorageEvent) -> AreaKind {
    let local = window.local_storage().ok().flatten();
    match (event.storage_area(), local) {
        (Some(area), Some(local)) if JsValue::from(area) == JsValue::from(local) => {
            AreaKind::Persistent
        }
        _ => AreaKind::Session,
    }
}
