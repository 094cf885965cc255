//! Visitor registration core.
//!
//! Holds the registration record, the validation schema applied to
//! submitted forms, and the storage backends behind a single
//! [`RegistrationStore`] trait.

mod error;
pub mod store;
mod types;
pub mod validation;

pub use error::StoreError;
pub use store::{MemoryStore, RegistrationStore, SqliteStore};
pub use types::*;
pub use validation::{
    validate_form, validate_registration, FieldIssue, RegistrationForm, ValidationErrors,
};

#[cfg(any(test, feature = "mock"))]
pub use store::MockRegistrationStore;
