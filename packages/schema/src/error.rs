//! Error types for the schema layer.

/// A validator rejected (or failed to transform) its input.
///
/// Carries the validator's own description of the rejection. This is a data
/// fault: callers recover from it by falling back to a configured default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    /// Create a rejection with the given description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The supplied validator matches none of the recognized calling
/// conventions.
///
/// Unlike [`ParseError`] this is a caller configuration bug, not a runtime
/// data issue, and is not recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    /// No calling convention matched during probing.
    #[error("no validator function found")]
    NoParseFunction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_displays_message() {
        let e = ParseError::new("expected a boolean");
        assert_eq!(format!("{}", e), "expected a boolean");
    }

    #[test]
    fn shape_error_display() {
        assert_eq!(
            format!("{}", ShapeError::NoParseFunction),
            "no validator function found"
        );
    }
}
