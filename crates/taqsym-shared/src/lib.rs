//! # Taqsym Shared
//!
//! Wire types of the gateway's HTTP surface. The HTTP backend clients speak
//! the same shapes, so they live in their own crate.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
