use super::{email, present, required};
use crate::error::ValidationError;

/// Login credentials that passed presence and format checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email_addr: String, password: String) -> Result<Self, ValidationError> {
        Ok(Self {
            email: email("email", email_addr)?,
            password: present("password", password)?,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// A validated account registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: String,
    email: String,
    password: String,
}

impl Registration {
    pub fn new(name: String, email_addr: String, password: String) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required("name", name)?,
            email: email("email", email_addr)?,
            password: present("password", password)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Result of a successful registration as reported by the identity backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub id: i64,
    pub message: String,
}

/// Public profile of a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub email: String,
}
