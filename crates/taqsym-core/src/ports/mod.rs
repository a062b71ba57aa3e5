//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod backend;

pub use auth::{AuthError, TokenVerifier};
pub use backend::{IdentityBackend, WorkItemBackend};
