//! Registration record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted visitor registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub name: String,
    pub company_name: String,
    pub job_title: String,
    pub mobile_number: String,
    pub office_phone: Option<String>,
    pub email: String,
    pub website: Option<String>,
    pub office_address: String,
    pub country: String,
    pub industry: String,
    pub source_event: String,
    pub follow_up_date: Option<String>,
    pub follow_up: bool,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Stamped once at creation; no mutation path exists.
    pub updated_at: DateTime<Utc>,
}

/// A validated registration ready to be inserted.
///
/// Optional fields are already normalized: empty input has become `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    pub name: String,
    pub company_name: String,
    pub job_title: String,
    pub mobile_number: String,
    pub office_phone: Option<String>,
    pub email: String,
    pub website: Option<String>,
    pub office_address: String,
    pub country: String,
    pub industry: String,
    pub source_event: String,
    pub follow_up_date: Option<String>,
    pub follow_up: bool,
    pub comment: Option<String>,
}

impl NewRegistration {
    /// Turn into a full record with a fresh id and both timestamps set to `now`.
    pub fn into_registration(self, now: DateTime<Utc>) -> Registration {
        Registration {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            company_name: self.company_name,
            job_title: self.job_title,
            mobile_number: self.mobile_number,
            office_phone: self.office_phone,
            email: self.email,
            website: self.website,
            office_address: self.office_address,
            country: self.country,
            industry: self.industry,
            source_event: self.source_event,
            follow_up_date: self.follow_up_date,
            follow_up: self.follow_up,
            comment: self.comment,
            created_at: now,
            updated_at: now,
        }
    }
}
