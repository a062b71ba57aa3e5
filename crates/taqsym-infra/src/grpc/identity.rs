use async_trait::async_trait;
use tonic::transport::Channel;

use taqsym_core::BackendError;
use taqsym_core::domain::{Credentials, Profile, RegisteredUser, Registration};
use taqsym_core::ports::IdentityBackend;

use super::proto::auth::{self, auth_service_client::AuthServiceClient};
use super::{RpcChannel, backend_error};
use crate::endpoint::{ConnectError, EndpointConfig};

/// Identity service reached over gRPC (`auth.AuthService`).
#[derive(Clone)]
pub struct GrpcIdentityClient {
    channel: RpcChannel,
}

impl GrpcIdentityClient {
    pub async fn connect(config: &EndpointConfig) -> Result<Self, ConnectError> {
        Ok(Self {
            channel: RpcChannel::connect(config).await?,
        })
    }

    pub fn lazy(config: &EndpointConfig) -> Result<Self, ConnectError> {
        Ok(Self {
            channel: RpcChannel::lazy(config)?,
        })
    }

    fn client(&self) -> AuthServiceClient<Channel> {
        AuthServiceClient::new(self.channel.channel())
    }
}

#[async_trait]
impl IdentityBackend for GrpcIdentityClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, BackendError> {
        let request = self.channel.request(auth::LoginRequest {
            email: credentials.email().to_string(),
            password: credentials.password().to_string(),
        });

        let mut client = self.client();
        let response = self
            .channel
            .bounded("Login", client.login(request))
            .await
            .map_err(|status| match backend_error(status) {
                // An unknown email is reported the same way as a wrong password.
                BackendError::NotFound(msg) => BackendError::Unauthenticated(msg),
                other => other,
            })?;

        Ok(response.token)
    }

    async fn register(&self, registration: &Registration) -> Result<RegisteredUser, BackendError> {
        let request = self.channel.request(auth::RegisterRequest {
            name: registration.name().to_string(),
            email: registration.email().to_string(),
            password: registration.password().to_string(),
        });

        let mut client = self.client();
        let response = self
            .channel
            .bounded("Register", client.register(request))
            .await
            .map_err(backend_error)?;

        Ok(RegisteredUser {
            id: response.id,
            message: response.message,
        })
    }

    async fn profile(&self, subject_id: i64) -> Result<Profile, BackendError> {
        let request = self.channel.request(auth::ProfileRequest { id: subject_id });

        let mut client = self.client();
        let response = self
            .channel
            .bounded("Profile", client.profile(request))
            .await
            .map_err(backend_error)?;

        Ok(Profile {
            id: response.id,
            name: response.name,
            email: response.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};
    use tokio::net::TcpListener;
    use tonic::transport::Server;
    use tonic::{Request, Response, Status};

    use crate::grpc::proto::auth::auth_service_server::{AuthService, AuthServiceServer};
    use crate::grpc::test_server;

    fn credentials() -> Credentials {
        Credentials::new("a@b.com".to_string(), "  pass phrase  ".to_string()).unwrap()
    }

    /// Identity service that knows one account and records what it was asked.
    #[derive(Clone, Default)]
    struct FakeAuthService {
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[tonic::async_trait]
    impl AuthService for FakeAuthService {
        async fn login(
            &self,
            request: Request<auth::LoginRequest>,
        ) -> Result<Response<auth::LoginResponse>, Status> {
            let req = request.into_inner();
            self.seen.lock().unwrap().push(format!("login:{}:{}", req.email, req.password));
            if req.email != "a@b.com" {
                return Err(Status::not_found("user not found"));
            }
            Ok(Response::new(auth::LoginResponse {
                token: "signed.jwt.token".to_string(),
            }))
        }

        async fn register(
            &self,
            request: Request<auth::RegisterRequest>,
        ) -> Result<Response<auth::RegisterResponse>, Status> {
            let req = request.into_inner();
            if req.email == "a@b.com" {
                return Err(Status::already_exists("email already registered"));
            }
            Ok(Response::new(auth::RegisterResponse {
                id: 12,
                message: format!("welcome {}", req.name),
            }))
        }

        async fn profile(
            &self,
            request: Request<auth::ProfileRequest>,
        ) -> Result<Response<auth::ProfileResponse>, Status> {
            let id = request.into_inner().id;
            self.seen.lock().unwrap().push(format!("profile:{id}"));
            Ok(Response::new(auth::ProfileResponse {
                id,
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            }))
        }
    }

    async fn serve(service: FakeAuthService) -> GrpcIdentityClient {
        let addr =
            test_server::serve(Server::builder().add_service(AuthServiceServer::new(service)))
                .await;
        let config = EndpointConfig::new(format!("http://{addr}"))
            .with_call_timeout(Duration::from_secs(2));
        GrpcIdentityClient::connect(&config).await.unwrap()
    }

    #[tokio::test]
    async fn test_login_round_trip() {
        let service = FakeAuthService::default();
        let client = serve(service.clone()).await;

        let token = client.login(&credentials()).await.unwrap();

        assert_eq!(token, "signed.jwt.token");
        assert_eq!(
            service.seen.lock().unwrap().as_slice(),
            ["login:a@b.com:  pass phrase  ".to_string()]
        );
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_unauthenticated() {
        let client = serve(FakeAuthService::default()).await;
        let creds = Credentials::new("ghost@b.com".to_string(), "x".to_string()).unwrap();

        let err = client.login(&creds).await.unwrap_err();
        assert!(matches!(err, BackendError::Unauthenticated(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_register_round_trip_and_conflict() {
        let client = serve(FakeAuthService::default()).await;

        let reg = Registration::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "secret".to_string(),
        )
        .unwrap();
        let user = client.register(&reg).await.unwrap();
        assert_eq!(user.id, 12);
        assert_eq!(user.message, "welcome Ada");

        let taken =
            Registration::new("Ada".to_string(), "a@b.com".to_string(), "secret".to_string())
                .unwrap();
        let err = client.register(&taken).await.unwrap_err();
        assert_eq!(err, BackendError::Conflict("email already registered".to_string()));
    }

    #[tokio::test]
    async fn test_profile_requests_subject() {
        let service = FakeAuthService::default();
        let client = serve(service.clone()).await;

        let profile = client.profile(42).await.unwrap();

        assert_eq!(profile.id, 42);
        assert_eq!(profile.name, "Ada");
        assert_eq!(service.seen.lock().unwrap().as_slice(), ["profile:42".to_string()]);
    }

    #[tokio::test]
    async fn test_login_against_closed_port_is_unavailable() {
        // Nothing listens on port 1.
        let config = EndpointConfig::new("http://127.0.0.1:1")
            .with_call_timeout(Duration::from_millis(500));
        let client = GrpcIdentityClient::lazy(&config).unwrap();

        let err = client.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_silent_backend_is_bounded_by_call_timeout() {
        // Accepts TCP connections but never speaks HTTP/2.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = EndpointConfig::new(format!("http://{addr}"))
            .with_call_timeout(Duration::from_millis(200));
        let client = GrpcIdentityClient::lazy(&config).unwrap();

        let started = Instant::now();
        let err = client.profile(42).await.unwrap_err();

        assert!(matches!(err, BackendError::Unavailable(_)), "{err:?}");
        assert!(started.elapsed() < Duration::from_secs(3));
    }
}
