//! Visitor registration service client.
//!
//! Submits registration forms (mapping server errors back onto form
//! fields) and fetches the admin listing, which is then filtered locally.

mod client;
mod error;
pub mod filter;
mod types;

pub use client::RegistrationClient;
pub use error::{ClientError, DUPLICATE_EMAIL_MESSAGE};
pub use filter::{distinct_values, Facet, RegistrationFilter};
pub use registration_core::{FieldIssue, Registration, RegistrationForm};
pub use types::*;
