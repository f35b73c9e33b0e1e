//! Error types for the area layer.
//!
//! Errors at this level are about the storage surface itself. No semantic
//! errors like "malformed entry" or "schema rejection" - those belong in
//! higher layers.

/// Errors raised by a storage area.
///
/// These describe the host surface failing, not the data in it. Decode and
/// validation failures are modeled one layer up.
#[derive(Debug)]
pub enum AreaError {
    /// The host refused the operation.
    ///
    /// Permission policy, private-browsing restrictions, etc.
    AccessDenied { message: String },

    /// The area refused a write because it is out of space.
    ///
    /// The size limit is enforced out of process. `limit` is the byte limit
    /// that was hit, when the host reports one; browser hosts usually do
    /// not.
    QuotaExceeded { limit: Option<usize> },

    /// The area exists but cannot be used right now.
    Unavailable,

    /// Any other host failure, with the underlying cause.
    Backend(Box<dyn std::error::Error>),
}

impl std::fmt::Display for AreaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AreaError::AccessDenied { message } => write!(f, "access denied: {}", message),
            AreaError::QuotaExceeded { limit } => match limit {
                Some(limit) => write!(f, "quota exceeded (limit {} bytes)", limit),
                None => write!(f, "quota exceeded"),
            },
            AreaError::Unavailable => write!(f, "storage area unavailable"),
            AreaError::Backend(e) => write!(f, "storage backend error: {}", e),
        }
    }
}

impl std::error::Error for AreaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AreaError::Backend(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn error_display_works() {
        let e = AreaError::Unavailable;
        assert_eq!(format!("{}", e), "storage area unavailable");

        let e = AreaError::QuotaExceeded { limit: Some(8) };
        assert!(format!("{}", e).contains("quota exceeded"));
        assert!(format!("{}", e).contains("8"));

        let e = AreaError::QuotaExceeded { limit: None };
        assert_eq!(format!("{}", e), "quota exceeded");

        let e = AreaError::AccessDenied {
            message: "storage disabled".to_string(),
        };
        assert!(format!("{}", e).contains("storage disabled"));
    }

    #[test]
    fn backend_error_exposes_its_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "surface gone");
        let e = AreaError::Backend(Box::new(io_err));

        assert!(format!("{}", e).contains("surface gone"));
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn other_variants_have_no_source() {
        assert!(StdError::source(&AreaError::Unavailable).is_none());
        assert!(StdError::source(&AreaError::QuotaExceeded { limit: None }).is_none());
    }
}
