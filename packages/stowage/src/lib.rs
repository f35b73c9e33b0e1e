//! Stowage: typed, schema-validated bindings over origin-scoped key/value
//! storage.
//!
//! A [`Binding`] pairs one key in one storage area with an observable cell
//! and the read-validate-write-notify protocol around it: reads decode and
//! validate the stored text (falling back to a configured initial value on
//! any data fault), writes serialize, persist, and broadcast, and every
//! binding on the same key - in this document or another same-origin
//! document - converges after a write.
//!
//! The stack is layered:
//! - [`stowage-area`](stowage_area): the raw storage-area contract
//! - [`stowage-schema`](stowage_schema): the parser adapter over the four
//!   validator calling conventions
//! - [`stowage-bind`](stowage_bind): codec, observable cell, change hub,
//!   and the binding itself
//! - `stowage-web` (wasm32 only): the browser's storage surfaces and the
//!   native cross-document event relay
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use stowage::{Binding, Environment, StorageConfig};
//!
//! let env = Rc::new(Environment::in_memory());
//!
//! let volume = Binding::persistent(&env, StorageConfig::new("volume", 40u32));
//! let mirror = Binding::persistent(&env, StorageConfig::new("volume", 40u32));
//!
//! volume.update(|v| v + 10);
//! assert_eq!(mirror.get(), 50, "peer bindings converge after a write");
//! ```

pub use stowage_area::{AreaError, AreaKind, MemoryArea, StorageArea};
pub use stowage_bind::{
    area_handle, codec, AreaHandle, Binding, CellSubscription, ChangeHub, ChangeNotice,
    CodecError, Decoded, Environment, HubSubscription, Schema, Setter, StorageConfig, Update,
    ValueCell, UNDEFINED_SENTINEL,
};
pub use stowage_schema::{
    parse_fn, BoundParser, CallShape, DeserializeValidator, FnValidator, ParseError, ShapeError,
    Validator,
};

#[cfg(target_arch = "wasm32")]
pub use stowage_web::{attach_storage_relay, browser_environment, StorageRelay, WebArea};
