//! # Taqsym Core
//!
//! The domain layer of the gateway: identity claims, validated commands,
//! and the ports that verifiers and backend clients implement.
//! This crate has no transport or framework dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{BackendError, ValidationError};
