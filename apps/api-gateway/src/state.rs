//! Application state - shared across all handlers.

use std::sync::Arc;

use taqsym_core::ports::{IdentityBackend, WorkItemBackend};
use taqsym_infra::{
    ConnectError, GrpcIdentityClient, GrpcWorkItemClient, HttpIdentityClient, HttpWorkItemClient,
};

use crate::config::{AppConfig, BackendConfig, Transport};

/// Shared application state.
///
/// Backend clients are built once by the composition root and shared by
/// every worker; each holds a single long-lived connection.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityBackend>,
    pub work_items: Arc<dyn WorkItemBackend>,
}

impl AppState {
    pub fn new(identity: Arc<dyn IdentityBackend>, work_items: Arc<dyn WorkItemBackend>) -> Self {
        Self {
            identity,
            work_items,
        }
    }

    /// Build the backend clients selected by configuration.
    pub async fn connect(config: &AppConfig) -> Result<Self, ConnectError> {
        let identity = identity_backend(&config.identity).await?;
        let work_items = work_item_backend(&config.work_items).await?;

        tracing::info!(
            identity_transport = %config.identity.transport,
            identity_url = %config.identity.endpoint.url,
            work_item_transport = %config.work_items.transport,
            work_item_url = %config.work_items.endpoint.url,
            "Application state initialized"
        );

        Ok(Self::new(identity, work_items))
    }
}

async fn identity_backend(config: &BackendConfig) -> Result<Arc<dyn IdentityBackend>, ConnectError> {
    let backend: Arc<dyn IdentityBackend> = match config.transport {
        Transport::Grpc => Arc::new(GrpcIdentityClient::connect(&config.endpoint).await?),
        Transport::Http => Arc::new(HttpIdentityClient::new(&config.endpoint)?),
    };
    Ok(backend)
}

async fn work_item_backend(
    config: &BackendConfig,
) -> Result<Arc<dyn WorkItemBackend>, ConnectError> {
    let backend: Arc<dyn WorkItemBackend> = match config.transport {
        Transport::Grpc => Arc::new(GrpcWorkItemClient::connect(&config.endpoint).await?),
        Transport::Http => Arc::new(HttpWorkItemClient::new(&config.endpoint)?),
    };
    Ok(backend)
}
