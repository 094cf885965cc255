//! Visitor Registration Service - intake and listing API.
//!
//! Accepts visitor registrations over HTTP, validates them, rejects
//! duplicate emails and persists them with retry around transient
//! store failures.

pub mod api;
pub mod config;
pub mod error;
pub mod retry;

pub use config::Config;
pub use error::ApiError;
pub use retry::{with_retry, RetryPolicy, Transient};
