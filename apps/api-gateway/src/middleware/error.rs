//! Error handling - RFC 7807 compliant responses.
//!
//! Backend messages are logged here and never copied into a response body.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use taqsym_core::ports::AuthError;
use taqsym_core::{BackendError, ValidationError};
use taqsym_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    /// Rejected by the dispatch middleware.
    Unauthenticated(AuthError),
    /// The identity backend refused the presented credentials at login.
    InvalidCredentials,
    /// A backend refused the request on behalf of the caller.
    AccessDenied,
    NotFound(String),
    Conflict(String),
    ServiceUnavailable,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthenticated(err) => write!(f, "Unauthenticated: {}", err),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::AccessDenied => write!(f, "Access denied by backend"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ServiceUnavailable => write!(f, "Service unavailable"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

/// Fixed wording per rejection reason.
fn auth_detail(err: &AuthError) -> &'static str {
    match err {
        AuthError::NoCredential => {
            "Please provide a valid Bearer token in the Authorization header."
        }
        AuthError::MalformedCredential => "Expected an Authorization header of the form 'Bearer <token>'.",
        AuthError::InvalidSignature => "The token is not signed with the expected algorithm.",
        AuthError::InvalidToken => "The token is invalid or has expired. Please login again.",
        AuthError::MissingSubject => "The token does not identify a user.",
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) | AppError::InvalidCredentials | AppError::AccessDenied => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(detail) = self {
            // Log internal errors
            tracing::error!("Internal error: {}", detail);
        }

        HttpResponse::build(self.status_code()).json(self.problem())
    }
}

impl AppError {
    /// Problem details body for this error.
    pub fn problem(&self) -> ErrorResponse {
        match self {
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthenticated(err) => ErrorResponse::unauthorized()
                .with_detail(auth_detail(err))
                .with_code(err.reason()),
            AppError::InvalidCredentials => ErrorResponse::unauthorized()
                .with_detail("Invalid email or password.")
                .with_code("invalid_credentials"),
            AppError::AccessDenied => ErrorResponse::unauthorized()
                .with_detail("The request was refused for this identity.")
                .with_code("unauthenticated"),
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::ServiceUnavailable => ErrorResponse::service_unavailable(
                "A backend service is temporarily unavailable. Please retry later.",
            ),
            AppError::Internal(_) => ErrorResponse::internal_error(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

// Conversion from backend outcomes
impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unauthenticated(msg) => {
                tracing::warn!(backend_message = %msg, "Backend refused the caller");
                AppError::AccessDenied
            }
            BackendError::InvalidInput(msg) => {
                tracing::warn!(backend_message = %msg, "Backend rejected input");
                AppError::BadRequest("The request was rejected as invalid.".to_string())
            }
            BackendError::Conflict(msg) => {
                tracing::info!(backend_message = %msg, "Backend reported a conflict");
                AppError::Conflict("Resource already exists.".to_string())
            }
            BackendError::NotFound(msg) => {
                tracing::debug!(backend_message = %msg, "Backend reported not found");
                AppError::NotFound("Resource not found.".to_string())
            }
            BackendError::Unavailable(msg) => {
                tracing::error!(backend_message = %msg, "Backend unavailable");
                AppError::ServiceUnavailable
            }
            BackendError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
