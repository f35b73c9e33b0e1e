//! Stowage Schema: The Parser Adapter
//!
//! Validators in the wild follow several calling conventions. This layer
//! normalizes four of them behind one invocation contract:
//!
//! 1. The validator is itself callable.
//! 2. The validator exposes a `parse` method.
//! 3. The validator exposes a `validate_sync` method.
//! 4. The validator exposes a `create` method.
//!
//! [`parse_fn`] probes a [`Validator`] for these shapes in exactly that
//! order and binds the first one it supports. A validator supporting none of
//! the four fails with [`ShapeError::NoParseFunction`].
//!
//! # Example
//!
//! ```rust
//! use stowage_schema::{parse_fn, FnValidator, ParseError};
//!
//! let boolean = FnValidator::new(|input| {
//!     input
//!         .as_bool()
//!         .ok_or_else(|| ParseError::new("expected a boolean"))
//! });
//!
//! let parser = parse_fn(&boolean).unwrap();
//! assert_eq!(parser.parse(serde_json::json!(true)).unwrap(), true);
//! assert!(parser.parse(serde_json::json!("hello")).is_err());
//! ```

mod adapter;
mod error;
mod validators;

pub use adapter::{parse_fn, BoundParser, CallShape, Validator};
pub use error::{ParseError, ShapeError};
pub use validators::{DeserializeValidator, FnValidator};
