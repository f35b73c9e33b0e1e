//! Stowage Web: The Browser Collaborators
//!
//! Adapts the browser's two origin-scoped storage surfaces to the
//! [`StorageArea`](stowage_area::StorageArea) contract and relays the native
//! cross-document `storage` event into the environment's change hub.
//!
//! wasm32 only: on any other target this crate compiles to an empty library.

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{attach_storage_relay, browser_environment, StorageRelay, WebArea};
