//! Authentication port.

use crate::domain::IdentityClaim;

/// Verifies bearer credentials.
///
/// Implementations hold their signing secret and must be pure: the same
/// credential at the same instant always yields the same outcome.
pub trait TokenVerifier: Send + Sync {
    /// Verify a full `Authorization` header value (`"Bearer <token>"`).
    fn verify(&self, credential: &str) -> Result<IdentityClaim, AuthError>;
}

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authorization header")]
    NoCredential,

    #[error("Malformed credential")]
    MalformedCredential,

    #[error("Unexpected signing algorithm")]
    InvalidSignature,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has no numeric subject")]
    MissingSubject,
}

impl AuthError {
    /// Stable, machine-readable reason returned to callers.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::NoCredential => "no_credential",
            AuthError::MalformedCredential => "malformed_credential",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::InvalidToken => "invalid_token",
            AuthError::MissingSubject => "missing_subject",
        }
    }
}
