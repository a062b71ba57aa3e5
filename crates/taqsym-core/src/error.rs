//! Domain-level error types.

use thiserror::Error;

/// Input that failed presence or format checks before reaching a backend.
///
/// Messages are built from field names only, so they are safe to return to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} is not a valid email address")]
    InvalidEmail { field: &'static str },

    #[error("{field} must be a positive integer")]
    NotPositive { field: &'static str },
}

/// Outcome of a failed backend call, independent of the transport that produced it.
///
/// The `String` payloads carry the backend's own message for logging; they are
/// never forwarded to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("Backend error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Unauthenticated(_) => "unauthenticated",
            BackendError::InvalidInput(_) => "invalid_input",
            BackendError::Conflict(_) => "conflict",
            BackendError::NotFound(_) => "not_found",
            BackendError::Unavailable(_) => "unavailable",
            BackendError::Internal(_) => "internal",
        }
    }
}
