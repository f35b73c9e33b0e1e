//! Stowage Area: The Storage-Area Contract
//!
//! This is the narrow waist of the stowage stack. Everything at this level is
//! a synchronous key/text map - no serialization, no validation, no change
//! notification. Those belong in higher layers.
//!
//! Use this layer for:
//! - Adapting a host-provided storage surface (browser storage, a test map)
//! - Anything that moves text under keys without inspecting it
//!
//! # Example
//!
//! ```rust
//! use stowage_area::{MemoryArea, StorageArea, AreaError};
//!
//! fn read_theme(area: &mut dyn StorageArea) -> Result<Option<String>, AreaError> {
//!     area.get_item("theme")
//! }
//!
//! let mut area = MemoryArea::new();
//! area.set_item("theme", "\"dark\"").unwrap();
//! assert_eq!(read_theme(&mut area).unwrap().as_deref(), Some("\"dark\""));
//! ```

mod error;
mod kind;
mod memory;
mod traits;

pub use error::AreaError;
pub use kind::AreaKind;
pub use memory::MemoryArea;
pub use traits::StorageArea;
