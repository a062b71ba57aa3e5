use async_trait::async_trait;

use taqsym_core::BackendError;
use taqsym_core::domain::{Credentials, Profile, RegisteredUser, Registration};
use taqsym_core::ports::IdentityBackend;
use taqsym_shared::dto::{
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, RegisterResponse,
};

use super::HttpBackend;
use crate::endpoint::{ConnectError, EndpointConfig};

/// Identity service reached over HTTP.
///
/// Routes: `POST /login`, `POST /register`, `GET /users/{id}`.
#[derive(Clone)]
pub struct HttpIdentityClient {
    backend: HttpBackend,
}

impl HttpIdentityClient {
    pub fn new(config: &EndpointConfig) -> Result<Self, ConnectError> {
        Ok(Self {
            backend: HttpBackend::new(config)?,
        })
    }
}

#[async_trait]
impl IdentityBackend for HttpIdentityClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, BackendError> {
        let body = LoginRequest {
            email: credentials.email().to_string(),
            password: credentials.password().to_string(),
        };

        let response: LoginResponse = self
            .backend
            .send(self.backend.post("/login").json(&body))
            .await
            .map_err(|e| match e {
                BackendError::NotFound(msg) => BackendError::Unauthenticated(msg),
                other => other,
            })?;

        Ok(response.token)
    }

    async fn register(&self, registration: &Registration) -> Result<RegisteredUser, BackendError> {
        let body = RegisterRequest {
            name: registration.name().to_string(),
            email: registration.email().to_string(),
            password: registration.password().to_string(),
        };

        let response: RegisterResponse = self
            .backend
            .send(self.backend.post("/register").json(&body))
            .await?;

        Ok(RegisteredUser {
            id: response.id,
            message: response.message,
        })
    }

    async fn profile(&self, subject_id: i64) -> Result<Profile, BackendError> {
        let response: ProfileResponse = self
            .backend
            .send(self.backend.get(&format!("/users/{subject_id}")))
            .await?;

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
    use crate::http::test_server::respond_once;
    use std::time::Duration;

    fn client_for(url: String) -> HttpIdentityClient {
        HttpIdentityClient::new(
            &EndpointConfig::new(url).with_call_timeout(Duration::from_millis(500)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let (addr, request) = respond_once("200 OK", r#"{"token":"abc.def.ghi"}"#).await;
        let client = client_for(format!("http://{addr}"));

        let creds =
            Credentials::new("a@b.com".to_string(), "  pass phrase  ".to_string()).unwrap();
        let token = client.login(&creds).await.unwrap();

        assert_eq!(token, "abc.def.ghi");
        let request = request.await.unwrap();
        assert!(request.starts_with("POST /login "));
        assert!(request.contains(r#""email":"a@b.com""#));
        assert!(request.contains(r#""password":"  pass phrase  ""#));
    }

    #[tokio::test]
    async fn test_register_conflict() {
        let (addr, _request) = respond_once("409 Conflict", r#"{"error":"duplicate key"}"#).await;
        let client = client_for(format!("http://{addr}"));

        let reg = Registration::new(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            "secret".to_string(),
        )
        .unwrap();
        let err = client.register(&reg).await.unwrap_err();

        assert!(matches!(err, BackendError::Conflict(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_profile_is_keyed_on_subject() {
        let (addr, request) =
            respond_once("200 OK", r#"{"id":42,"name":"Ada","email":"ada@example.com"}"#).await;
        let client = client_for(format!("http://{addr}"));

        let profile = client.profile(42).await.unwrap();

        assert_eq!(profile.id, 42);
        assert!(request.await.unwrap().starts_with("GET /users/42 "));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let client = client_for("http://127.0.0.1:1".to_string());
        let creds = Credentials::new("a@b.com".to_string(), "x".to_string()).unwrap();

        let err = client.login(&creds).await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)), "{err:?}");
    }
}
