//! In-memory registration store.

use super::RegistrationStore;
use crate::error::StoreError;
use crate::types::{NewRegistration, Registration};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// In-memory store for tests or when persistence is disabled.
///
/// Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    /// Rows in insertion order
    rows: RwLock<Vec<Registration>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored registrations.
    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|r| r.email == email).cloned())
    }

    #[instrument(skip(self, new), fields(email = %new.email))]
    async fn create(&self, new: NewRegistration) -> Result<Registration, StoreError> {
        let mut rows = self.rows.write().await;

        if rows.iter().any(|r| r.email == new.email) {
            return Err(StoreError::UniqueViolation(format!(
                "registrations.email: {}",
                new.email
            )));
        }

        let registration = new.into_registration(Utc::now());
        rows.push(registration.clone());

        debug!(id = %registration.id, total = rows.len(), "Stored registration in memory");
        Ok(registration)
    }

    async fn list_newest_first(&self) -> Result<Vec<Registration>, StoreError> {
        let rows = self.rows.read().await;

        // Reverse first so the stable sort keeps later inserts ahead on ties.
        let mut listed: Vec<Registration> = rows.iter().rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listed)
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn close(&self) {
        debug!("Memory store: close is a no-op");
    }
}
