//! gRPC backend clients.
//!
//! Each client owns one long-lived [`Channel`] created at startup. The channel
//! multiplexes concurrent calls and is cloned per call, never redialed.

mod identity;
pub mod proto;
mod work_item;

pub use identity::GrpcIdentityClient;
pub use work_item::GrpcWorkItemClient;

use std::future::Future;
use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};

use taqsym_core::BackendError;

use crate::endpoint::{ConnectError, EndpointConfig};

/// A channel to one backend plus the deadline applied to every call on it.
#[derive(Clone)]
pub(crate) struct RpcChannel {
    channel: Channel,
    call_timeout: Duration,
}

impl RpcChannel {
    fn endpoint(config: &EndpointConfig) -> Result<Endpoint, ConnectError> {
        let endpoint = Endpoint::from_shared(config.url.clone()).map_err(|e| {
            ConnectError::InvalidUrl {
                url: config.url.clone(),
                reason: e.to_string(),
            }
        })?;

        Ok(endpoint
            .connect_timeout(config.connect_timeout)
            .timeout(config.call_timeout)
            .tcp_keepalive(Some(Duration::from_secs(30))))
    }

    /// Dial the backend now. If it is not reachable yet, fall back to a lazily
    /// connecting channel so the gateway still starts; calls fail with
    /// `Unavailable` until the backend comes up.
    pub(crate) async fn connect(config: &EndpointConfig) -> Result<Self, ConnectError> {
        let endpoint = Self::endpoint(config)?;

        let channel = match endpoint.connect().await {
            Ok(channel) => {
                tracing::info!(url = %config.url, "Connected to gRPC backend");
                channel
            }
            Err(e) => {
                tracing::warn!(
                    url = %config.url,
                    error = %e,
                    "gRPC backend not reachable at startup, connecting lazily"
                );
                endpoint.connect_lazy()
            }
        };

        Ok(Self {
            channel,
            call_timeout: config.call_timeout,
        })
    }

    /// Build a channel that dials on first use.
    pub(crate) fn lazy(config: &EndpointConfig) -> Result<Self, ConnectError> {
        Ok(Self {
            channel: Self::endpoint(config)?.connect_lazy(),
            call_timeout: config.call_timeout,
        })
    }

    /// A handle on the shared channel for a generated client.
    pub(crate) fn channel(&self) -> Channel {
        self.channel.clone()
    }

    /// Wrap a message, carrying the call deadline to the server.
    pub(crate) fn request<T>(&self, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        request.set_timeout(self.call_timeout);
        request
    }

    /// Await a generated client call, bounded by the call timeout.
    pub(crate) async fn bounded<T>(
        &self,
        method: &'static str,
        call: impl Future<Output = Result<tonic::Response<T>, Status>>,
    ) -> Result<T, Status> {
        match tokio::time::timeout(self.call_timeout, call).await {
            Ok(result) => result
                .map(tonic::Response::into_inner)
                .map_err(classify_transport_failure),
            Err(_) => Err(Status::deadline_exceeded(format!(
                "{method} did not answer within {:?}",
                self.call_timeout
            ))),
        }
    }
}

/// Channel errors that tonic could not classify surface as `Unknown`; they
/// still mean the backend was never reached. Generated clients report a
/// channel that never became ready the same way, without a source.
fn classify_transport_failure(status: Status) -> Status {
    let from_transport = std::error::Error::source(&status)
        .is_some_and(|source| source.is::<tonic::transport::Error>());
    let not_ready = status.message().starts_with("Service was not ready");

    if status.code() == Code::Unknown && (from_transport || not_ready) {
        Status::unavailable(status.message().to_string())
    } else {
        status
    }
}

/// Translate a gRPC status into the transport-independent taxonomy.
pub(crate) fn backend_error(status: Status) -> BackendError {
    let message = status.message().to_string();
    match status.code() {
        Code::Unauthenticated | Code::PermissionDenied => BackendError::Unauthenticated(message),
        Code::InvalidArgument | Code::FailedPrecondition | Code::OutOfRange => {
            BackendError::InvalidInput(message)
        }
        Code::AlreadyExists => BackendError::Conflict(message),
        Code::NotFound => BackendError::NotFound(message),
        Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled | Code::ResourceExhausted => {
            BackendError::Unavailable(message)
        }
        _ => BackendError::Internal(format!("{:?}: {message}", status.code())),
    }
}


#[cfg(test)]
pub(crate) mod test_server {
    //! In-process gRPC servers for exercising the clients.

    use std::net::SocketAddr;

    use tokio::net::TcpListener;
    use tokio_stream::wrappers::TcpListenerStream;
    use tonic::transport::server::Router;

    /// Serve `router` on an ephemeral local port until the test runtime stops.
    pub async fn serve(router: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(router.serve_with_incoming(TcpListenerStream::new(listener)));
        addr
    }
}
