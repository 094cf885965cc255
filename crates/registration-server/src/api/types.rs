//! API request and response types.

use serde::{Deserialize, Serialize};

/// Response after a registration is stored.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationCreatedResponse {
    pub message: String,
    pub id: String,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store_healthy: bool,
}
