//! Identity handlers: login, register and profile.

use actix_web::{HttpResponse, web};

use taqsym_core::BackendError;
use taqsym_core::domain::{Credentials, Registration};
use taqsym_shared::dto::{
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let credentials = Credentials::new(req.email, req.password)?;

    let token = state
        .identity
        .login(&credentials)
        .await
        .map_err(|err| match err {
            BackendError::Unauthenticated(msg) => {
                tracing::debug!(backend_message = %msg, "Backend refused credentials");
                AppError::InvalidCredentials
            }
            other => other.into(),
        })?;

    tracing::debug!("Login succeeded");
    Ok(HttpResponse::Ok().json(LoginResponse { token }))
}

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let registration = Registration::new(req.name, req.email, req.password)?;

    let user = state
        .identity
        .register(&registration)
        .await
        .map_err(|err| match err {
            BackendError::Conflict(msg) => {
                tracing::info!(backend_message = %msg, "Registration for an existing email");
                AppError::Conflict("Email already registered".to_string())
            }
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(HttpResponse::Created().json(RegisterResponse {
        id: user.id,
        message: user.message,
    }))
}

/// GET /profile
///
/// Requires authentication. The subject comes from the verified token only.
pub async fn profile(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let profile = state
        .identity
        .profile(identity.subject_id())
        .await
        .map_err(|err| match err {
            BackendError::NotFound(msg) => {
                tracing::warn!(
                    subject_id = identity.subject_id(),
                    backend_message = %msg,
                    "Authenticated subject has no profile"
                );
                AppError::NotFound("User not found".to_string())
            }
            other => other.into(),
        })?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        id: profile.id,
        name: profile.name,
        email: profile.email,
    }))
}
