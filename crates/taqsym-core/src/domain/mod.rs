//! Domain entities and validated commands.

mod identity;
mod user;
mod work_item;

pub use identity::IdentityClaim;
pub use user::{Credentials, Profile, RegisteredUser, Registration};
pub use work_item::{NewWorkItem, WorkItem};

use crate::error::ValidationError;

/// Trim a required text field, rejecting blank input.
fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Reject blank input but keep the value byte for byte.
fn present(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing { field });
    }
    Ok(value)
}

fn email(field: &'static str, value: String) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(value)
        }
        _ => Err(ValidationError::InvalidEmail { field }),
    }
}
