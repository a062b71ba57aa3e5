//! HTTP backend clients - the alternate transport for services that expose a
//! JSON API instead of gRPC. They speak the gateway's own wire shapes.

mod identity;
mod work_item;

pub use identity::HttpIdentityClient;
pub use work_item::HttpWorkItemClient;

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use taqsym_core::BackendError;

use crate::endpoint::{ConnectError, EndpointConfig};

/// Pooled HTTP client bound to one backend base URL.
#[derive(Clone)]
pub(crate) struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub(crate) fn new(config: &EndpointConfig) -> Result<Self, ConnectError> {
        let base_url = reqwest::Url::parse(&config.url)
            .map_err(|e| ConnectError::InvalidUrl {
                url: config.url.clone(),
                reason: e.to_string(),
            })?
            .as_str()
            .trim_end_matches('/')
            .to_string();

        let client = reqwest::Client::builder()
            .timeout(config.call_timeout)
            .connect_timeout(config.connect_timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .build()
            .map_err(|e| ConnectError::Client(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(format!("{}{}", self.base_url, path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(format!("{}{}", self.base_url, path))
    }

    /// Send the request and decode a successful JSON body.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, BackendError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Internal(format!("undecodable response: {e}")))
    }
}

/// Translate a downstream status code into the transport-independent taxonomy.
pub(crate) fn status_error(status: StatusCode, body: String) -> BackendError {
    let message = if body.is_empty() {
        status.to_string()
    } else {
        body
    };

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BackendError::Unauthenticated(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            BackendError::InvalidInput(message)
        }
        StatusCode::CONFLICT => BackendError::Conflict(message),
        StatusCode::NOT_FOUND => BackendError::NotFound(message),
        StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT
        | StatusCode::TOO_MANY_REQUESTS => BackendError::Unavailable(message),
        _ => BackendError::Internal(message),
    }
}

fn transport_error(err: reqwest::Error) -> BackendError {
    if err.is_builder() {
        BackendError::Internal(err.to_string())
    } else {
        // connect, timeout and mid-flight I/O failures
        BackendError::Unavailable(err.to_string())
    }
}

#[cfg(test)]
pub(crate) mod test_server {
    //! A one-shot HTTP/1.1 responder for exercising the clients.

    use std::net::SocketAddr;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve a single canned response; the request head is sent back through the channel.
    pub async fn respond_once(status_line: &'static str, body: &'static str) -> (SocketAddr, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            // Read the head, then as much body as Content-Length announces.
            let head_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
                if n == 0 {
                    break buf.len();
                }
            };
            let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
            let content_length = head
                .lines()
                .filter_map(|l| l.split_once(':'))
                .find(|(k, _)| k.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while buf.len() < head_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&buf).to_string());
        });

        (addr, rx)
    }
}
