//! Bearer-token dispatch middleware and the identity extractor.
//!
//! [`RequireAuth`] wraps protected resources only. A request either leaves it
//! carrying a verified [`Identity`] in its extensions, or is answered with 401
//! before any handler runs.

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{self, HeaderMap},
};
use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::sync::Arc;

use taqsym_core::domain::IdentityClaim;
use taqsym_core::ports::{AuthError, TokenVerifier};

use super::error::AppError;

/// Authenticated identity of the caller, valid for one request.
///
/// Use this in handlers mounted behind [`RequireAuth`]:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.subject_id())
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity(IdentityClaim);

impl Identity {
    pub fn subject_id(&self) -> i64 {
        self.0.subject_id
    }
}

impl From<IdentityClaim> for Identity {
    fn from(claim: IdentityClaim) -> Self {
        Self(claim)
    }
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Present only if RequireAuth ran and succeeded.
        let identity = req.extensions().get::<Identity>().cloned();
        ready(identity.ok_or(AppError::Unauthenticated(AuthError::NoCredential)))
    }
}

/// Extract and verify the credential of a request.
fn authenticate(verifier: &dyn TokenVerifier, headers: &HeaderMap) -> Result<Identity, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::NoCredential)?;
    let credential = value
        .to_str()
        .map_err(|_| AuthError::MalformedCredential)?;

    if credential.trim().is_empty() {
        return Err(AuthError::NoCredential);
    }

    verifier.verify(credential).map(Identity::from)
}

/// Authentication middleware factory for protected resources.
pub struct RequireAuth {
    verifier: Arc<dyn TokenVerifier>,
}

impl RequireAuth {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RequireAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthService {
            service,
            verifier: self.verifier.clone(),
        }))
    }
}

pub struct RequireAuthService<S> {
    service: S,
    verifier: Arc<dyn TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(self.verifier.as_ref(), req.headers()) {
            Ok(identity) => {
                tracing::debug!(subject_id = identity.subject_id(), "Request authenticated");
                req.extensions_mut().insert(identity);

                let fut = self.service.call(req);
                Box::pin(async move {
                    let res = fut.await?;
                    Ok(res.map_into_left_body())
                })
            }
            Err(err) => {
                tracing::warn!(
                    reason = err.reason(),
                    method = %req.method(),
                    path = %req.path(),
                    "Rejected unauthenticated request"
                );

                // from_error keeps the AppError readable by RequestIdMiddleware.
                let response = HttpResponse::from_error(AppError::Unauthenticated(err));
                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);

                Box::pin(async move { Ok(srv_response.map_into_right_body()) })
            }
        }
    }
}
