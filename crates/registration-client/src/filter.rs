//! Admin-side registration filters.
//!
//! Filters are pure predicates over an already fetched listing; changing
//! a filter never calls the service again.

use chrono::NaiveDate;
use registration_core::Registration;
use std::collections::BTreeSet;

/// Combined admin filter. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationFilter {
    /// Case-insensitive substring on name, email, company and job title
    pub search: Option<String>,
    pub industry: Option<String>,
    pub country: Option<String>,
    pub source_event: Option<String>,
    pub follow_up: Option<bool>,
    /// Inclusive lower bound on the creation date (UTC)
    pub created_from: Option<NaiveDate>,
    /// Inclusive upper bound on the creation date (UTC)
    pub created_to: Option<NaiveDate>,
}

impl RegistrationFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn source_event(mut self, source_event: impl Into<String>) -> Self {
        self.source_event = Some(source_event.into());
        self
    }

    pub fn follow_up(mut self, follow_up: bool) -> Self {
        self.follow_up = Some(follow_up);
        self
    }

    pub fn created_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.created_from = from;
        self.created_to = to;
        self
    }

    /// Whether no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.industry.is_none()
            && self.country.is_none()
            && self.source_event.is_none()
            && self.follow_up.is_none()
            && self.created_from.is_none()
            && self.created_to.is_none()
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Check a single registration against every set criterion.
    pub fn matches(&self, registration: &Registration) -> bool {
        if let Some(term) = self.search_term() {
            let hit = [
                &registration.name,
                &registration.email,
                &registration.company_name,
                &registration.job_title,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));

            if !hit {
                return false;
            }
        }

        if !exact(&self.industry, &registration.industry)
            || !exact(&self.country, &registration.country)
            || !exact(&self.source_event, &registration.source_event)
        {
            return false;
        }

        if self.follow_up.is_some_and(|f| f != registration.follow_up) {
            return false;
        }

        let created = registration.created_at.date_naive();
        if self.created_from.is_some_and(|from| created < from) {
            return false;
        }
        if self.created_to.is_some_and(|to| created > to) {
            return false;
        }

        true
    }

    /// Keep matching registrations, preserving their order.
    pub fn apply<'a>(&self, registrations: &'a [Registration]) -> Vec<&'a Registration> {
        registrations.iter().filter(|r| self.matches(r)).collect()
    }
}

fn exact(wanted: &Option<String>, actual: &str) -> bool {
    wanted.as_deref().map_or(true, |w| w == actual)
}

/// Categorical fields offered as filter choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Industry,
    Country,
    SourceEvent,
}

/// Sorted distinct values of `facet` across `registrations`.
pub fn distinct_values(registrations: &[Registration], facet: Facet) -> Vec<String> {
    registrations
        .iter()
        .map(|r| match facet {
            Facet::Industry => r.industry.as_str(),
            Facet::Country => r.country.as_str(),
            Facet::SourceEvent => r.source_event.as_str(),
        })
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
