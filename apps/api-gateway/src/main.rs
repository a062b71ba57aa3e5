//! # Taqsym API Gateway
//!
//! Authenticates inbound HTTP calls with bearer tokens and dispatches them to
//! the identity and work-item backends.

use std::sync::Arc;

use actix_web::{
    App, Error, HttpServer,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};
use tracing_actix_web::TracingLogger;

use taqsym_core::ports::TokenVerifier;
use taqsym_infra::{JwtConfig, JwtTokenVerifier};

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::{GatewayRootSpan, RequestIdMiddleware};
use state::AppState;
use telemetry::TelemetryConfig;

/// The gateway application: middleware, shared state and routes.
///
/// `RequestIdMiddleware` is registered last so it runs outermost and the
/// root span opened by `TracingLogger` already sees the request ID.
fn build_app(
    state: AppState,
    verifier: Arc<dyn TokenVerifier>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .wrap(TracingLogger::<GatewayRootSpan>::new())
        .wrap(RequestIdMiddleware)
        .app_data(web::Data::new(state))
        .app_data(handlers::json_config())
        .configure(move |cfg| handlers::configure_routes(cfg, verifier))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env()?;

    tracing::info!(
        "Starting Taqsym API Gateway on {}:{}",
        config.host,
        config.port
    );

    let verifier: Arc<dyn TokenVerifier> = Arc::new(JwtTokenVerifier::new(JwtConfig::from_env()));
    let state = AppState::connect(&config).await?;

    HttpServer::new(move || build_app(state.clone(), verifier.clone()))
    .shutdown_timeout(config.shutdown_timeout_secs)
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    tracing::info!("Server exiting");
    Ok(())
}
