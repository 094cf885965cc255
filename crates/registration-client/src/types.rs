//! Registration API wire types.

use registration_core::FieldIssue;
use serde::Deserialize;

/// Successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitOutcome {
    pub message: String,
    pub id: String,
}

/// Error body returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub details: Option<Vec<FieldIssue>>,
}
