//! Error types for the registration service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use registration_core::{FieldIssue, StoreError, ValidationErrors};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

pub const VALIDATION_FAILED: &str = "Validation failed";
pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Validation failed")]
    Validation(Vec<FieldIssue>),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("Storage error: {0}")]
    Store(StoreError),}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldIssue>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            ApiError::EmailAlreadyRegistered => {
                (StatusCode::BAD_REQUEST, "EMAIL_ALREADY_REGISTERED")
            }
            ApiError::MalformedBody(_) | ApiError::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = match self {
            ApiError::Validation(issues) => ErrorResponse {
                error: VALIDATION_FAILED.to_string(),
                code: code.to_string(),
                details: Some(issues),
            },
            ApiError::EmailAlreadyRegistered => ErrorResponse {
                error: EMAIL_ALREADY_REGISTERED.to_string(),
                code: code.to_string(),
                details: None,
            },
            // Detail stays in the log, never in the response
            other => {
                error!(error = %other, "Request failed");
                ErrorResponse {
                    error: INTERNAL_SERVER_ERROR.to_string(),
                    code: code.to_string(),
                    details: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UniqueViolation(_) => ApiError::EmailAlreadyRegistered,
            other => ApiError::Store(other),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        ApiError::Validation(e.issues)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::MalformedBody(e.to_string())
    }
}
