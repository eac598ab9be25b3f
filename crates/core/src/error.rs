//! Error types for the tracker client
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use crate::field::FieldKind;
use thiserror::Error;

/// Result type alias for tracker client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the tracker client
///
/// Per-value decode failures never appear here: the codec recovers them
/// locally and degrades the single field to a null value instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Network-level failure reported by the transport
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-success HTTP status returned by the service
    #[error("HTTP status {status} for {path}")]
    Http {
        /// Status code of the response
        status: u16,
        /// Request path that produced it
        path: String,
    },

    /// Malformed JSON in a response body
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A tracker schema payload that cannot be used
    #[error("unusable schema for tracker {tracker_id}: {reason}")]
    Schema {
        /// Tracker whose schema was requested
        tracker_id: i64,
        /// What was wrong with the payload
        reason: String,
    },

    /// Value/kind combination the encoder has no rule for
    ///
    /// This is a programming or schema-drift error: it fails the single
    /// write operation, never the process.
    #[error("cannot encode field '{field}' of kind {kind:?}")]
    Encode {
        /// Name of the offending field
        field: String,
        /// Declared kind of the field
        kind: FieldKind,
    },

    /// Create response that carries no artifact id
    #[error("create response for {path} carries no artifact id")]
    MissingId {
        /// Request path of the create call
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_transport() {
        let err = Error::Transport("connection refused".to_string());
        let msg = err.to_string();
        assert!(msg.contains("transport error"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_error_display_http() {
        let err = Error::Http {
            status: 404,
            path: "artifacts/42".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("artifacts/42"));
    }

    #[test]
    fn test_error_display_schema() {
        let err = Error::Schema {
            tracker_id: 1041,
            reason: "missing fields array".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1041"));
        assert!(msg.contains("missing fields array"));
    }

    #[test]
    fn test_error_display_encode() {
        let err = Error::Encode {
            field: "status".to_string(),
            kind: FieldKind::SingleChoice,
        };
        let msg = err.to_string();
        assert!(msg.contains("status"));
        assert!(msg.contains("SingleChoice"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let result: std::result::Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: Error = result.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        assert_eq!(returns_result().unwrap(), 42);
    }
}
