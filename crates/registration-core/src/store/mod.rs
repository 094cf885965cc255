//! Registration storage backends.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::types::{NewRegistration, Registration};
use async_trait::async_trait;

/// Persistence contract for registrations.
///
/// Email uniqueness is enforced by the backend itself; a second `create`
/// with an existing email fails with [`StoreError::UniqueViolation`].
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Look up a registration by its email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, StoreError>;

    /// Insert a new registration, assigning its id and timestamps.
    async fn create(&self, new: NewRegistration) -> Result<Registration, StoreError>;

    /// Every registration, newest `created_at` first.
    async fn list_newest_first(&self) -> Result<Vec<Registration>, StoreError>;

    /// Health check - returns true if the store answers.
    async fn health_check(&self) -> bool;

    /// Release backend resources. Called once on shutdown.
    async fn close(&self);
}
