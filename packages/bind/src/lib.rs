//! Stowage Bind: Typed Storage Bindings
//!
//! This layer turns a raw storage area into a typed, validated, synchronized
//! accessor:
//! - `codec`: text serialization with optional schema validation on read
//! - `ValueCell`: the observable cell mirroring the last-known-good value
//! - `ChangeHub` / `ChangeNotice`: the cross-consumer broadcast channel
//! - `Environment`: the execution context's areas wired to one hub
//! - `Binding`: the read-validate-write-notify protocol for one
//!   `(storage area, key)` pair
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use stowage_bind::{Binding, Environment, StorageConfig};
//! use stowage_schema::{FnValidator, ParseError};
//!
//! let env = Rc::new(Environment::in_memory());
//!
//! let dark_mode = Binding::persistent(
//!     &env,
//!     StorageConfig::new("dark_mode", false).with_schema(FnValidator::new(|input| {
//!         input
//!             .as_bool()
//!             .ok_or_else(|| ParseError::new("expected a boolean"))
//!     })),
//! );
//!
//! dark_mode.update(|prev| !prev);
//! assert!(dark_mode.get());
//! ```
//!
//! # Concurrency
//!
//! Single-threaded and event-driven: every operation completes or fails
//! before returning, and convergence between bindings is a property of the
//! shared hub and storage area, not of threads. Two bindings writing the
//! same key in quick succession are last-write-wins by design.

mod binding;
mod cell;
pub mod codec;
mod env;
mod notify;
mod update;

pub use binding::{Binding, Schema, Setter, StorageConfig};
pub use cell::{CellSubscription, ValueCell};
pub use codec::{CodecError, Decoded, UNDEFINED_SENTINEL};
pub use env::{area_handle, AreaHandle, Environment};
pub use notify::{ChangeHub, ChangeNotice, HubSubscription};
pub use update::Update;

// Re-export the layers below for convenience
pub use stowage_area::{AreaError, AreaKind, MemoryArea, StorageArea};
pub use stowage_schema::{ParseError, ShapeError, Validator};
