//! # Taqsym Infrastructure
//!
//! Concrete implementations of the ports defined in `taqsym-core`:
//! the JWT verifier and the identity/work-item backend clients.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `auth` - HMAC JWT verification via jsonwebtoken
//! - `grpc` - gRPC backend clients via tonic
//! - `http` - HTTP backend clients via reqwest

pub mod endpoint;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "grpc")]
pub mod grpc;

#[cfg(feature = "http")]
pub mod http;

pub use endpoint::{ConnectError, EndpointConfig};

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenVerifier};

#[cfg(feature = "grpc")]
pub use grpc::{GrpcIdentityClient, GrpcWorkItemClient};

#[cfg(feature = "http")]
pub use http::{HttpIdentityClient, HttpWorkItemClient};
