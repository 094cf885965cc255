//! Registration service HTTP client.

use crate::error::ClientError;
use crate::filter::RegistrationFilter;
use crate::types::{ErrorBody, SubmitOutcome};
use registration_core::{validate_form, Registration, RegistrationForm};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";

/// Client for the registration form and the admin listing.
#[derive(Clone)]
pub struct RegistrationClient {
    client: Client,
    base_url: String,
}

impl RegistrationClient {
    /// Create a new registration client.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn registration_url(&self) -> String {
        format!("{}/api/registration", self.base_url)
    }

    /// Check if the service is healthy.
    pub async fn health_check(&self) -> bool {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Submit a registration form.
    ///
    /// The form is checked locally with the same rules the service applies,
    /// so obviously invalid input never leaves the client.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn submit(&self, form: &RegistrationForm) -> Result<SubmitOutcome, ClientError> {
        validate_form(form).map_err(|e| ClientError::Validation(e.issues))?;

        let response = self
            .client
            .post(self.registration_url())
            .json(form)
            .send()
            .await?;

        if response.status().is_success() {
            let outcome: SubmitOutcome = response.json().await?;
            debug!(id = %outcome.id, "Registration submitted");
            return Ok(outcome);
        }

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        warn!(%status, "Registration rejected");

        Err(match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) if body.error == EMAIL_ALREADY_REGISTERED => ClientError::DuplicateEmail,
            Ok(ErrorBody {
                details: Some(details),
                ..
            }) => ClientError::Validation(details),
            Ok(body) => ClientError::Api(body.error),
            Err(_) => ClientError::Api(format!("{}: {}", status, text)),
        })
    }

    /// Fetch every registration, newest first.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Registration>, ClientError> {
        let response = self.client.get(self.registration_url()).send().await?;

        if !response.status().is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ClientError::Api(msg));
        }

        let registrations: Vec<Registration> = response.json().await?;
        debug!("Fetched {} registrations", registrations.len());
        Ok(registrations)
    }

    /// Fetch once, then filter locally.
    pub async fn list_filtered(
        &self,
        filter: &RegistrationFilter,
    ) -> Result<Vec<Registration>, ClientError> {
        let registrations = self.list().await?;
        Ok(filter.apply(&registrations).into_iter().cloned().collect())
    }
}
