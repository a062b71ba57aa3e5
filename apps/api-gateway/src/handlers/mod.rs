//! HTTP handlers and route configuration.

mod auth;
mod health;
mod tasks;


use std::sync::Arc;

use actix_web::{error::JsonPayloadError, web};

use taqsym_core::ports::TokenVerifier;

use crate::middleware::auth::RequireAuth;
use crate::middleware::error::AppError;

/// Configure all application routes.
///
/// Only `/profile` and `/tasks` are wrapped by [`RequireAuth`]; the other
/// routes never see the verifier.
pub fn configure_routes(cfg: &mut web::ServiceConfig, verifier: Arc<dyn TokenVerifier>) {
    cfg
        // Public routes
        .route("/health", web::get().to(health::health_check))
        .route("/login", web::post().to(auth::login))
        .route("/register", web::post().to(auth::register))
        // Protected routes
        .service(
            web::resource("/profile")
                .wrap(RequireAuth::new(verifier.clone()))
                .route(web::get().to(auth::profile)),
        )
        .service(
            web::resource("/tasks")
                .wrap(RequireAuth::new(verifier))
                .route(web::get().to(tasks::list))
                .route(web::post().to(tasks::create)),
        );
}

/// JSON extractor configuration; undecodable bodies get the same problem
/// format as validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, req| {
            tracing::debug!(error = %err, path = %req.path(), "Rejected request body");

            let detail = match err {
                JsonPayloadError::ContentType => "Expected a JSON request body.",
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    "Request body is too large."
                }
                _ => "Request body is not valid JSON.",
            };
            AppError::BadRequest(detail.to_string()).into()
        })
}
