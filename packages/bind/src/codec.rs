//! Text serialization for stored entries, with optional validation on the
//! read path.
//!
//! The write path is trusting: the in-memory value is either the caller's
//! configured initial value or was itself produced by a successful earlier
//! decode, so no schema runs on encode. The read path is lenient: corrupt or
//! stale entries never surface an error to the consumer of a binding - they
//! decode to "no value", which callers treat as "fall back to the initial
//! value". [`try_decode`] is the `Result`-returning step underneath;
//! [`decode`] is the collapsed public boundary.

use serde::de::DeserializeOwned;
use serde::Serialize;

use stowage_schema::{parse_fn, ParseError, ShapeError, Validator};

/// The literal text standing in for an absent/undefined value.
///
/// Other consumers of the same storage area may legitimately write this
/// sentinel instead of JSON; it decodes to "no value" without touching the
/// structural parser or any schema.
pub const UNDEFINED_SENTINEL: &str = "undefined";

/// Errors on the encode/decode path.
///
/// All variants except [`Shape`](CodecError::Shape) are data faults and are
/// collapsed to "no value" at the public boundary. `Shape` is a caller
/// configuration bug and escapes.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The value did not serialize to JSON text.
    #[error("value did not serialize: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored text is not valid JSON (and not the sentinel).
    #[error("stored text is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The stored structure does not deserialize into the target type.
    #[error("stored value does not fit the expected type: {0}")]
    Mismatch(#[source] serde_json::Error),

    /// The configured schema rejected the stored structure.
    #[error("schema rejected the stored value: {0}")]
    Rejected(#[from] ParseError),

    /// The configured validator matches no known calling convention.
    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// The outcome of a successful decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded<T> {
    /// The entry held the sentinel: there is no value.
    Absent,
    /// The entry decoded (and validated) into a value.
    Present(T),
}

/// Serialize `value` to storable text.
///
/// The output is exactly invertible by the structural deserializer used on
/// the read path.
pub fn encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    serde_json::to_string(value).map_err(CodecError::Encode)
}

/// Like [`encode`], but `None` encodes to [`UNDEFINED_SENTINEL`].
///
/// This is the explicit exception to the round-trip law: the sentinel text
/// decodes to [`Decoded::Absent`], not to a JSON value.
pub fn encode_option<T: Serialize>(value: Option<&T>) -> Result<String, CodecError> {
    match value {
        Some(v) => encode(v),
        None => Ok(UNDEFINED_SENTINEL.to_string()),
    }
}

/// Decode stored text, validating through `schema` when one is given.
///
/// The sentinel short-circuits to `Absent` before structural parsing, so a
/// sentinel entry never reaches the schema. With a schema, the validator's
/// parse function is re-resolved on every call (shape probing is pure);
/// without one, the structure must deserialize into `T` directly.
pub fn try_decode<T: DeserializeOwned>(
    text: &str,
    schema: Option<&dyn Validator<T>>,
) -> Result<Decoded<T>, CodecError> {
    if text == UNDEFINED_SENTINEL {
        return Ok(Decoded::Absent);
    }

    let structural: serde_json::Value =
        serde_json::from_str(text).map_err(CodecError::Malformed)?;

    let value = match schema {
        Some(validator) => parse_fn(validator)?.parse(structural)?,
        None => serde_json::from_value(structural).map_err(CodecError::Mismatch)?,
    };

    Ok(Decoded::Present(value))
}

/// Decode stored text, collapsing every data fault to `None`.
///
/// Data faults (malformed text, type mismatch, schema rejection) are logged
/// and reported as `None`; callers already treat `None` as "use the initial
/// value", so a corrupt entry silently reverts to the configured default.
///
/// # Panics
///
/// Panics when the configured validator matches none of the recognized
/// calling conventions. That is a caller configuration bug, detected only
/// here because shape probing happens at decode time.
pub fn decode<T: DeserializeOwned>(text: &str, schema: Option<&dyn Validator<T>>) -> Option<T> {
    match try_decode(text, schema) {
        Ok(Decoded::Present(value)) => Some(value),
        Ok(Decoded::Absent) => None,
        Err(CodecError::Shape(err)) => panic!("{}", err),
        Err(err) => {
            log::warn!("discarding stored entry: {}", err);
            None
        }
    }
}
