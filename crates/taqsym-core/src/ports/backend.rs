//! Backend ports - the identity and work-item services the gateway dispatches to.
//!
//! Inputs are validated commands, so nothing unvalidated can be forwarded.

use async_trait::async_trait;

use crate::domain::{Credentials, NewWorkItem, Profile, RegisteredUser, Registration, WorkItem};
use crate::error::BackendError;

/// Identity service: login, registration and profile lookup.
#[async_trait]
pub trait IdentityBackend: Send + Sync {
    /// Exchange credentials for a signed token.
    async fn login(&self, credentials: &Credentials) -> Result<String, BackendError>;

    /// Create a new account.
    async fn register(&self, registration: &Registration) -> Result<RegisteredUser, BackendError>;

    /// Fetch the profile of a subject.
    async fn profile(&self, subject_id: i64) -> Result<Profile, BackendError>;
}

/// Work-item (task) service.
#[async_trait]
pub trait WorkItemBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<WorkItem>, BackendError>;

    async fn create(&self, item: &NewWorkItem) -> Result<WorkItem, BackendError>;
}
