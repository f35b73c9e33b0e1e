//! Shape probing and the uniform invocation contract.

use serde_json::Value;

use crate::{ParseError, ShapeError};

/// One of the four validator calling conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    /// The validator is itself callable.
    Callable,
    /// The validator exposes a `parse` method.
    Parse,
    /// The validator exposes a `validate_sync` method.
    ValidateSync,
    /// The validator exposes a `create` method.
    Create,
}

impl CallShape {
    /// The fixed probing order. The first supported shape wins, so a
    /// validator exposing both `parse` and `validate_sync` is invoked
    /// through `parse`.
    pub const PROBE_ORDER: [CallShape; 4] = [
        CallShape::Callable,
        CallShape::Parse,
        CallShape::ValidateSync,
        CallShape::Create,
    ];
}

impl std::fmt::Display for CallShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallShape::Callable => write!(f, "callable"),
            CallShape::Parse => write!(f, "parse"),
            CallShape::ValidateSync => write!(f, "validate_sync"),
            CallShape::Create => write!(f, "create"),
        }
    }
}

/// An externally supplied validator, probed for the calling conventions it
/// exposes.
///
/// The system never defines validation semantics of its own; it only adapts
/// to whatever the caller hands it. Implementations answer [`supports`] for
/// each [`CallShape`] and route [`invoke`] to the matching entry point.
///
/// Invoking a shape for which `supports` returns `false` is a contract
/// violation; implementations should answer it with a [`ParseError`] rather
/// than panic.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Validator<T>>` or
/// `Rc<dyn Validator<T>>`.
///
/// [`supports`]: Validator::supports
/// [`invoke`]: Validator::invoke
pub trait Validator<T> {
    /// Whether this validator exposes the given calling convention.
    fn supports(&self, shape: CallShape) -> bool;

    /// Run the given calling convention on `input`.
    fn invoke(&self, shape: CallShape, input: Value) -> Result<T, ParseError>;
}

/// A validator bound to the first calling convention it supports.
///
/// Produced by [`parse_fn`]; the bound shape stays fixed for the lifetime of
/// the parser, so repeated [`parse`](BoundParser::parse) calls dispatch the
/// same way.
pub struct BoundParser<'a, T> {
    validator: &'a dyn Validator<T>,
    shape: CallShape,
}

impl<'a, T> std::fmt::Debug for BoundParser<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundParser").field("shape", &self.shape).finish()
    }
}

impl<'a, T> BoundParser<'a, T> {
    /// Which calling convention was matched.
    pub fn shape(&self) -> CallShape {
        self.shape
    }

    /// Validate `input`, producing the narrowed value.
    pub fn parse(&self, input: Value) -> Result<T, ParseError> {
        self.validator.invoke(self.shape, input)
    }
}

/// Resolve the parse function for `validator`.
///
/// Probes the shapes in [`CallShape::PROBE_ORDER`] and binds the first one
/// the validator supports. Pure: no state is kept between resolutions, and
/// callers re-resolve on every decode.
///
/// # Returns
///
/// * `Ok(parser)` - A parser bound to the matched shape.
/// * `Err(ShapeError::NoParseFunction)` - None of the four shapes matched.
pub fn parse_fn<T>(validator: &dyn Validator<T>) -> Result<BoundParser<'_, T>, ShapeError> {
    CallShape::PROBE_ORDER
        .iter()
        .copied()
        .find(|shape| validator.supports(*shape))
        .map(|shape| BoundParser { validator, shape })
        .ok_or(ShapeError::NoParseFunction)
}
