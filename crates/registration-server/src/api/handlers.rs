//! HTTP request handlers.

use super::types::{HealthResponse, RegistrationCreatedResponse};
use super::AppState;
use crate::error::ApiError;
use crate::retry::with_retry;
use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use registration_core::{validate_registration, Registration};
use serde_json::Value;
use tracing::{info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        store_healthy: state.store.health_check().await,
    })
}

/// Validate and store a new registration.
pub async fn create_registration(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RegistrationCreatedResponse>), ApiError> {
    let input: Value = serde_json::from_slice(&body)?;

    let new = validate_registration(&input).map_err(|e| {
        info!(issues = e.issues.len(), "Registration failed validation");
        ApiError::from(e)
    })?;

    let email = new.email.clone();
    info!(email = %email, "Registration request received");

    // Fast path only; the store's unique constraint is authoritative
    let existing = with_retry(&state.retry, || state.store.find_by_email(&email)).await?;
    if existing.is_some() {
        warn!(email = %email, "Attempted registration with existing email");
        return Err(ApiError::EmailAlreadyRegistered);
    }

    let registration = with_retry(&state.retry, || state.store.create(new.clone()))
        .await
        .map_err(|e| {
            let e = ApiError::from(e);
            if matches!(e, ApiError::EmailAlreadyRegistered) {
                warn!(email = %email, "Email registered concurrently");
            }
            e
        })?;

    info!(id = %registration.id, email = %email, "Registration stored");

    Ok((
        StatusCode::CREATED,
        Json(RegistrationCreatedResponse {
            message: "Registration successful".to_string(),
            id: registration.id,
        }),
    ))
}

/// List every registration, newest first.
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let registrations = with_retry(&state.retry, || state.store.list_newest_first()).await?;

    info!(count = registrations.len(), "Listed registrations");
    Ok(Json(registrations))
}
