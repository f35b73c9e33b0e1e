//! Validators shipped with the adapter.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{CallShape, ParseError, Validator};

/// A validator wrapping a plain function (the callable shape).
///
/// # Example
///
/// ```rust
/// use stowage_schema::{parse_fn, FnValidator, ParseError};
///
/// let positive = FnValidator::new(|input| {
///     input
///         .as_i64()
///         .filter(|n| *n > 0)
///         .ok_or_else(|| ParseError::new("expected a positive integer"))
/// });
///
/// let parser = parse_fn(&positive).unwrap();
/// assert_eq!(parser.parse(serde_json::json!(7)).unwrap(), 7);
/// ```
pub struct FnValidator<T> {
    f: Box<dyn Fn(Value) -> Result<T, ParseError>>,
}

impl<T> FnValidator<T> {
    /// Wrap `f` as a callable-shape validator.
    pub fn new(f: impl Fn(Value) -> Result<T, ParseError> + 'static) -> Self {
        Self { f: Box::new(f) }
    }
}

impl<T> Validator<T> for FnValidator<T> {
    fn supports(&self, shape: CallShape) -> bool {
        shape == CallShape::Callable
    }

    fn invoke(&self, shape: CallShape, input: Value) -> Result<T, ParseError> {
        match shape {
            CallShape::Callable => (self.f)(input),
            other => Err(ParseError::new(format!(
                "calling convention {} not supported",
                other
            ))),
        }
    }
}

/// A serde-backed validator (the `parse` shape).
///
/// Accepts exactly the inputs that deserialize into `T`. This is the schema
/// most Rust callers want: the target type itself is the contract.
pub struct DeserializeValidator<T> {
    _target: PhantomData<fn() -> T>,
}

impl<T> DeserializeValidator<T> {
    /// Create a validator for the target type `T`.
    pub fn new() -> Self {
        Self {
            _target: PhantomData,
        }
    }
}

impl<T> Default for DeserializeValidator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> Validator<T> for DeserializeValidator<T> {
    fn supports(&self, shape: CallShape) -> bool {
        shape == CallShape::Parse
    }

    fn invoke(&self, shape: CallShape, input: Value) -> Result<T, ParseError> {
        match shape {
            CallShape::Parse => {
                serde_json::from_value(input).map_err(|e| ParseError::new(e.to_string()))
            }
            other => Err(ParseError::new(format!(
                "calling convention {} not supported",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_fn;
    use serde_json::json;

    #[test]
    fn fn_validator_is_callable_shape() {
        let boolean = FnValidator::new(|input| {
            input
                .as_bool()
                .ok_or_else(|| ParseError::new("expected a boolean"))
        });

        let parser = parse_fn(&boolean).unwrap();
        assert_eq!(parser.shape(), CallShape::Callable);
        assert!(parser.parse(json!(true)).unwrap());
        assert!(parser.parse(json!("hello")).is_err());
    }

    #[test]
    fn fn_validator_rejects_foreign_shapes() {
        let v = FnValidator::new(|_| Ok(0i64));
        assert!(!v.supports(CallShape::Parse));
        assert!(v.invoke(CallShape::Parse, json!(1)).is_err());
    }

    #[test]
    fn deserialize_validator_is_parse_shape() {
        let v: DeserializeValidator<Vec<u32>> = DeserializeValidator::new();

        let parser = parse_fn(&v).unwrap();
        assert_eq!(parser.shape(), CallShape::Parse);
        assert_eq!(parser.parse(json!([1, 2, 3])).unwrap(), vec![1, 2, 3]);
        assert!(parser.parse(json!({"not": "a list"})).is_err());
    }

    #[test]
    fn deserialize_validator_narrows_numbers() {
        let v: DeserializeValidator<u8> = DeserializeValidator::new();
        let parser = parse_fn(&v).unwrap();

        assert_eq!(parser.parse(json!(200)).unwrap(), 200u8);
        assert!(parser.parse(json!(300)).is_err(), "out of range for u8");
    }
}
