//! Error types for lrudict
//!
//! Dictionary operations never fail; these only surface when bounds are
//! parsed from text or configuration.

use std::fmt;

/// Result type alias for lrudict parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for bound parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Text that is neither a number nor an unbounded marker
    InvalidCapacity(String),

    /// Text that is not a number
    InvalidLength(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(raw) => write!(
                f,
                "Invalid capacity: {:?} (expected a number, \"unbounded\" or \"nan\")",
                raw
            ),
            Error::InvalidLength(raw) => write!(f, "Invalid length: {:?} (expected a number)", raw),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidCapacity("lots".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid capacity: \"lots\" (expected a number, \"unbounded\" or \"nan\")"
        );

        let err = Error::InvalidLength("few".to_string());
        assert_eq!(err.to_string(), "Invalid length: \"few\" (expected a number)");
    }
}
