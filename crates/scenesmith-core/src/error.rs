//! Error types for the Scenesmith client.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the offending field (e.g. `scenes[2].title`)
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A shared error type for the entire Scenesmith client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every variant is recoverable;
/// callers surface the message and leave their state untouched.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ScenesmithError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Network or HTTP transport failure.
    ///
    /// `status` is `None` when the request never produced a response.
    #[error("HTTP error{}: {message}", status_suffix(.status))]
    Http {
        status: Option<u16>,
        message: String,
        retryable: bool,
    },

    /// The backend answered with `ok: false`
    #[error("API error: {0}")]
    Api(String),

    /// Request or response shape validation failed
    #[error("Validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    /// An operation that needs an active project was attempted without one
    #[error("No active project session")]
    MissingSession,

    /// The same operation is already in flight for this id
    #[error("{operation} already in progress for '{id}'")]
    InFlight { operation: &'static str, id: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ScenesmithError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a transport error for a request that produced no response
    pub fn network(message: impl Into<String>) -> Self {
        Self::Http {
            status: None,
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates an HTTP status error, classifying retryable statuses
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status: Some(status),
            message: message.into(),
            retryable: matches!(status, 408 | 429 | 500 | 502 | 503 | 504),
        }
    }

    /// Creates an Api error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Creates a Validation error with a single field message
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldError::new(field, message)])
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error (including HTTP 404)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Http {
                    status: Some(404),
                    ..
                }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error is worth retrying.
    ///
    /// Only transport failures and retryable HTTP statuses qualify; an
    /// `ok: false` answer from the backend is a definitive result.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http { retryable: true, .. })
    }

    /// Field-level messages for validation errors, empty otherwise
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ScenesmithError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ScenesmithError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ScenesmithError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ScenesmithError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ScenesmithError>`.
pub type Result<T> = std::result::Result<T, ScenesmithError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_classification() {
        assert!(ScenesmithError::http_status(503, "down").is_transient());
        assert!(ScenesmithError::http_status(429, "slow down").is_transient());
        assert!(!ScenesmithError::http_status(400, "bad").is_transient());
        assert!(!ScenesmithError::http_status(404, "missing").is_transient());
        assert!(ScenesmithError::network("connection refused").is_transient());
    }

    #[test]
    fn test_api_error_is_not_transient() {
        assert!(!ScenesmithError::api("nope").is_transient());
    }

    #[test]
    fn test_not_found_includes_http_404() {
        assert!(ScenesmithError::http_status(404, "Project not found").is_not_found());
        assert!(ScenesmithError::not_found("Project", "p1").is_not_found());
        assert!(!ScenesmithError::http_status(500, "boom").is_not_found());
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let err = ScenesmithError::Validation(vec![
            FieldError::new("concept", "must not be empty"),
            FieldError::new("sessionId", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: concept: must not be empty; sessionId: is required"
        );
        assert_eq!(err.field_errors().len(), 2);
    }

    #[test]
    fn test_http_display() {
        assert_eq!(
            ScenesmithError::http_status(500, "boom").to_string(),
            "HTTP error (500): boom"
        );
        assert_eq!(
            ScenesmithError::network("refused").to_string(),
            "HTTP error: refused"
        );
    }
}
