//! Error types for the script compiler boundaries.
//!
//! Compilation itself never fails; these errors only surface when parsing
//! requests or exporting scripts.

use thiserror::Error;

/// Result type alias for moviola operations.
pub type MoviolaResult<T> = Result<T, MoviolaError>;

/// Errors that can occur at the compiler's input/output boundaries.
#[derive(Error, Debug)]
pub enum MoviolaError {
    /// The request could not be interpreted as a compiler input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON parse or encode failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialization/deserialization error outside serde_json (e.g. JS values).
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl MoviolaError {
    /// Creates an InvalidInput error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates a Serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MoviolaError::invalid_input("missing narrativeText");
        assert_eq!(err.to_string(), "Invalid input: missing narrativeText");

        let err = MoviolaError::serialization("bad JsValue");
        assert_eq!(err.to_string(), "Serialization error: bad JsValue");
    }

    #[test]
    fn test_from_serde_json() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: MoviolaError = parse.unwrap_err().into();
        assert!(matches!(err, MoviolaError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
