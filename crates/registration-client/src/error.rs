//! Registration client errors.

use registration_core::FieldIssue;
use std::collections::BTreeMap;
use thiserror::Error;

/// Message shown on the email field when the address is taken.
pub const DUPLICATE_EMAIL_MESSAGE: &str = "This email is already registered";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation failed")]
    Validation(Vec<FieldIssue>),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("API error: {0}")]
    Api(String),
}

impl ClientError {
    /// Errors keyed by form field, for highlighting inputs.
    ///
    /// The first message wins when a field has several issues.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();

        match self {
            ClientError::DuplicateEmail => {
                fields.insert("email".to_string(), DUPLICATE_EMAIL_MESSAGE.to_string());
            }
            ClientError::Validation(issues) => {
                for issue in issues {
                    if let Some(field) = issue.field() {
                        fields
                            .entry(field.to_string())
                            .or_insert_with(|| issue.message.clone());
                    }
                }
            }
            _ => {}
        }

        fields
    }
}
