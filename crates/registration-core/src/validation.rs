//! Registration validation schema.
//!
//! Input arrives as untyped JSON. Validation runs in two passes whose
//! issues are merged:
//! - shape: every field must be present with the right JSON type
//! - rules: length bounds, phone pattern, email and URL checks
//!
//! Empty optional fields are normalized to `None` here and nowhere else.

use crate::types::NewRegistration;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::LazyLock;
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Optional leading `+`, a non-zero digit, then 3-15 digits, spaces, hyphens or parentheses.
pub static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[1-9][\d\s\-()]{3,15}$").expect("phone pattern is a valid regex")
});

/// Website values the form pre-fills before the visitor types anything.
const WEBSITE_PLACEHOLDERS: [&str; 2] = ["https://", "http://"];

/// Fields in declaration order, as (Rust name, wire name, label).
const FIELDS: [(&str, &str, &str); 14] = [
    ("name", "name", "Name"),
    ("company_name", "companyName", "Company name"),
    ("job_title", "jobTitle", "Job title"),
    ("mobile_number", "mobileNumber", "Mobile number"),
    ("office_phone", "officePhone", "Office phone"),
    ("email", "email", "Email"),
    ("website", "website", "Website"),
    ("office_address", "officeAddress", "Office address"),
    ("country", "country", "Country"),
    ("industry", "industry", "Industry"),
    ("source_event", "sourceEvent", "Source/Event"),
    ("follow_up_date", "followUpDate", "Follow-up date"),
    ("follow_up", "followUp", "Follow-up"),
    ("comment", "comment", "Comment"),
];

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Path to the offending field; `path[0]` is the wire field name.
    pub path: Vec<String>,
    pub message: String,
    pub code: String,
}

impl FieldIssue {
    fn new(field: &str, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            path: vec![field.to_string()],
            message: message.into(),
            code: code.into(),
        }
    }

    /// The top-level field this issue refers to, if any.
    pub fn field(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

/// Every issue found in one registration input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Validation failed ({} issue(s))", .issues.len())]
pub struct ValidationErrors {
    pub issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    /// Whether any issue targets `field` (wire name).
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field() == Some(field))
    }
}

/// Registration form as submitted by a visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[validate(length(min = 2, max = 50))]
    pub name: String,

    #[validate(length(min = 2, max = 100))]
    pub company_name: String,

    #[validate(length(min = 2, max = 100))]
    pub job_title: String,

    #[validate(
        length(min = 4, message = "Mobile number is required"),
        regex(path = *PHONE_PATTERN, message = "Please enter a valid mobile number")
    )]
    pub mobile_number: String,

    #[validate(regex(path = *PHONE_PATTERN, message = "Please enter a valid office phone number"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_phone: Option<String>,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(url(message = "Please enter a valid website URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[validate(length(min = 10, max = 200))]
    pub office_address: String,

    #[validate(length(min = 2, max = 50))]
    pub country: String,

    #[validate(length(min = 2, max = 50))]
    pub industry: String,

    #[validate(length(min = 2, max = 100))]
    pub source_event: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up_date: Option<String>,

    pub follow_up: bool,

    #[validate(length(max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl RegistrationForm {
    /// Map empty optional fields, and the bare website placeholder, to `None`.
    pub fn normalized(mut self) -> Self {
        self.office_phone = non_empty(self.office_phone);
        self.website = non_empty(self.website)
            .filter(|w| !WEBSITE_PLACEHOLDERS.contains(&w.as_str()));
        self.follow_up_date = non_empty(self.follow_up_date);
        self.comment = non_empty(self.comment);
        self
    }

    fn text(&self, wire_name: &str) -> Option<&str> {
        match wire_name {
            "name" => Some(&self.name),
            "companyName" => Some(&self.company_name),
            "jobTitle" => Some(&self.job_title),
            "mobileNumber" => Some(&self.mobile_number),
            "officePhone" => self.office_phone.as_deref(),
            "email" => Some(&self.email),
            "website" => self.website.as_deref(),
            "officeAddress" => Some(&self.office_address),
            "country" => Some(&self.country),
            "industry" => Some(&self.industry),
            "sourceEvent" => Some(&self.source_event),
            "followUpDate" => self.follow_up_date.as_deref(),
            "comment" => self.comment.as_deref(),
            _ => None,
        }
    }

    fn into_new_registration(self) -> NewRegistration {
        NewRegistration {
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
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Validate untyped input into a normalized registration.
pub fn validate_registration(input: &Value) -> Result<NewRegistration, ValidationErrors> {
    let Some(object) = input.as_object() else {
        return Err(ValidationErrors {
            issues: vec![FieldIssue {
                path: Vec::new(),
                message: format!("Expected object, received {}", json_type(input)),
                code: "invalid_type".into(),
            }],
        });
    };

    let mut shape = ShapeReader::new(object);
    let form = RegistrationForm {
        name: shape.required_str("name"),
        company_name: shape.required_str("companyName"),
        job_title: shape.required_str("jobTitle"),
        mobile_number: shape.required_str("mobileNumber"),
        office_phone: shape.optional_str("officePhone"),
        email: shape.required_str("email"),
        website: shape.optional_str("website"),
        office_address: shape.required_str("officeAddress"),
        country: shape.required_str("country"),
        industry: shape.required_str("industry"),
        source_event: shape.required_str("sourceEvent"),
        follow_up_date: shape.optional_str("followUpDate"),
        follow_up: shape.required_bool("followUp"),
        comment: shape.optional_str("comment"),
    }
    .normalized();

    let mut issues = shape.issues;
    let malformed: HashSet<String> = issues
        .iter()
        .filter_map(|i| i.field().map(String::from))
        .collect();

    // A field that already failed its type check is not also reported for rules.
    issues.extend(
        rule_issues(&form)
            .into_iter()
            .filter(|i| i.field().map_or(true, |f| !malformed.contains(f))),
    );

    if issues.is_empty() {
        Ok(form.into_new_registration())
    } else {
        issues.sort_by_key(|i| field_position(i.field()));
        Err(ValidationErrors { issues })
    }
}

/// Validate an already typed form, e.g. before submitting it.
pub fn validate_form(form: &RegistrationForm) -> Result<NewRegistration, ValidationErrors> {
    let form = form.clone().normalized();
    let issues = rule_issues(&form);

    if issues.is_empty() {
        Ok(form.into_new_registration())
    } else {
        Err(ValidationErrors { issues })
    }
}

/// Run the declarative rules, reporting issues in field order.
fn rule_issues(form: &RegistrationForm) -> Vec<FieldIssue> {
    let Err(errors) = form.validate() else {
        return Vec::new();
    };

    let by_field = errors.field_errors();
    let mut issues = Vec::new();

    for (rust_name, wire_name, label) in FIELDS {
        let Some(field_errors) = by_field.get(rust_name) else {
            continue;
        };
        for error in field_errors.iter() {
            let (code, fallback) = match &*error.code {
                "length" => length_issue(label, form.text(wire_name), error),
                "regex" | "email" | "url" => ("invalid_string", format!("Invalid {}", label)),
                _ => ("custom", format!("Invalid {}", label)),
            };
            let message = error.message.as_ref().map_or(fallback, |m| m.to_string());
            issues.push(FieldIssue::new(wire_name, message, code));
        }
    }

    issues
}

/// Split a length failure into `too_small` or `too_big`, with a message naming the bound.
fn length_issue(
    label: &str,
    value: Option<&str>,
    error: &ValidationError,
) -> (&'static str, String) {
    let bound = |name: &str| error.params.get(name).and_then(Value::as_u64);
    let chars = value.map_or(0, |v| v.chars().count() as u64);

    match bound("min") {
        Some(min) if chars < min => (
            "too_small",
            format!("{} must be at least {} characters", label, min),
        ),
        _ => (
            "too_big",
            format!(
                "{} must be at most {} characters",
                label,
                bound("max").unwrap_or_default()
            ),
        ),
    }
}

fn field_position(field: Option<&str>) -> usize {
    field
        .and_then(|f| FIELDS.iter().position(|(_, wire, _)| *wire == f))
        .unwrap_or(usize::MAX)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads typed fields out of a JSON object, recording type issues as it goes.
struct ShapeReader<'a> {
    object: &'a Map<String, Value>,
    issues: Vec<FieldIssue>,
}

impl<'a> ShapeReader<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            issues: Vec::new(),
        }
    }

    fn required_str(&mut self, field: &str) -> String {
        match self.object.get(field) {
            Some(Value::String(s)) => s.clone(),
            None => {
                self.issues.push(FieldIssue::new(field, "Required", "invalid_type"));
                String::new()
            }
            Some(other) => {
                self.type_issue(field, "string", other);
                String::new()
            }
        }
    }

    fn optional_str(&mut self, field: &str) -> Option<String> {
        match self.object.get(field) {
            Some(Value::String(s)) => Some(s.clone()),
            None | Some(Value::Null) => None,
            Some(other) => {
                self.type_issue(field, "string", other);
                None
            }
        }
    }

    fn required_bool(&mut self, field: &str) -> bool {
        match self.object.get(field) {
            Some(Value::Bool(b)) => *b,
            None => {
                self.issues.push(FieldIssue::new(field, "Required", "invalid_type"));
                false
            }
            Some(other) => {
                self.type_issue(field, "boolean", other);
                false
            }
        }
    }

    fn type_issue(&mut self, field: &str, expected: &str, received: &Value) {
        self.issues.push(FieldIssue::new(
            field,
            format!("Expected {}, received {}", expected, json_type(received)),
            "invalid_type",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_input() -> Value {
        json!({
            "name": "Abebe Kebede",
            "companyName": "Addis Logistics",
            "jobTitle": "Operations Manager",
            "mobileNumber": "+251911234567",
            "officePhone": "",
            "email": "abebe@addislogistics.example",
            "website": "https://",
            "officeAddress": "Bole Road, Addis Ababa",
            "country": "Ethiopia",
            "industry": "Logistics",
            "sourceEvent": "Trade Expo 2024",
            "followUpDate": "",
            "followUp": false,
            "comment": ""
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut input = valid_input();
        input[field] = value;
        input
    }

    fn without(field: &str) -> Value {
        let mut input = valid_input();
        input.as_object_mut().unwrap().remove(field);
        input
    }

    fn fields_of(err: &ValidationErrors) -> Vec<&str> {
        err.issues.iter().filter_map(|i| i.field()).collect()
    }

    #[test]
    fn test_valid_input_normalizes_optional_fields() {
        let new = validate_registration(&valid_input()).unwrap();

        assert_eq!(new.name, "Abebe Kebede");
        assert_eq!(new.email, "abebe@addislogistics.example");
        assert!(!new.follow_up);
        assert!(new.office_phone.is_none());
        assert!(new.website.is_none());
        assert!(new.follow_up_date.is_none());
        assert!(new.comment.is_none());
    }

    #[test]
    fn test_optional_fields_may_be_missing_or_null() {
        let mut input = without("officePhone");
        input["comment"] = Value::Null;
        input.as_object_mut().unwrap().remove("website");

        let new = validate_registration(&input).unwrap();
        assert!(new.office_phone.is_none());
        assert!(new.comment.is_none());
        assert!(new.website.is_none());
    }

    #[test]
    fn test_optional_values_are_kept() {
        let mut input = valid_input();
        input["officePhone"] = json!("+251 11 551 2345");
        input["website"] = json!("https://addislogistics.example");
        input["followUpDate"] = json!("next week");
        input["comment"] = json!("Call after 3pm");

        let new = validate_registration(&input).unwrap();
        assert_eq!(new.office_phone.as_deref(), Some("+251 11 551 2345"));
        assert_eq!(new.website.as_deref(), Some("https://addislogistics.example"));
        assert_eq!(new.follow_up_date.as_deref(), Some("next week"));
        assert_eq!(new.comment.as_deref(), Some("Call after 3pm"));
    }

    #[test]
    fn test_short_office_address() {
        let err = validate_registration(&with("officeAddress", json!("short"))).unwrap_err();

        assert_eq!(fields_of(&err), vec!["officeAddress"]);
        assert_eq!(err.issues[0].path, vec!["officeAddress".to_string()]);
        assert!(err.issues[0].message.contains("Office address"));
    }

    #[test]
    fn test_length_bounds_per_field() {
        let cases = [
            ("name", "A".to_string()),
            ("name", "A".repeat(51)),
            ("companyName", "A".to_string()),
            ("companyName", "A".repeat(101)),
            ("jobTitle", "A".repeat(101)),
            ("officeAddress", "A".repeat(201)),
            ("country", "E".to_string()),
            ("industry", "I".repeat(51)),
            ("sourceEvent", "S".to_string()),
            ("comment", "c".repeat(501)),
        ];

        for (field, value) in cases {
            let err = validate_registration(&with(field, json!(value))).unwrap_err();
            assert!(err.has_field(field), "expected issue for {}", field);
            assert_eq!(err.issues.len(), 1, "only {} should fail", field);
        }
    }

    #[test]
    fn test_length_issue_codes_and_messages() {
        let err = validate_registration(&with("name", json!("A"))).unwrap_err();
        assert_eq!(err.issues[0].code, "too_small");
        assert_eq!(err.issues[0].message, "Name must be at least 2 characters");

        let err = validate_registration(&with("name", json!("A".repeat(51)))).unwrap_err();
        assert_eq!(err.issues[0].code, "too_big");
        assert_eq!(err.issues[0].message, "Name must be at most 50 characters");

        let err = validate_registration(&with("officeAddress", json!("short"))).unwrap_err();
        assert_eq!(err.issues[0].code, "too_small");
        assert_eq!(
            err.issues[0].message,
            "Office address must be at least 10 characters"
        );

        let err = validate_registration(&with("comment", json!("c".repeat(501)))).unwrap_err();
        assert_eq!(err.issues[0].code, "too_big");
        assert_eq!(err.issues[0].message, "Comment must be at most 500 characters");
    }

    #[test]
    fn test_string_format_issue_codes() {
        for (field, value) in [
            ("mobileNumber", "+251"),
            ("officePhone", "phone"),
            ("email", "nope"),
            ("website", "not a url"),
        ] {
            let err = validate_registration(&with(field, json!(value))).unwrap_err();
            assert_eq!(err.issues[0].code, "invalid_string", "{}", field);
        }

        let err = validate_registration(&with("mobileNumber", json!("+1"))).unwrap_err();
        let mut codes: Vec<&str> = err.issues.iter().map(|i| i.code.as_str()).collect();
        codes.sort_unstable();
        assert_eq!(codes, vec!["invalid_string", "too_small"]);
        assert!(err
            .issues
            .iter()
            .any(|i| i.code == "too_small" && i.message == "Mobile number is required"));
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 50 two-byte characters
        let name = "é".repeat(50);
        assert!(validate_registration(&with("name", json!(name))).is_ok());
    }

    #[test]
    fn test_phone_pattern() {
        for ok in ["+251911234567", "911 234 567", "1 (555) 123-4567", "+1234"] {
            assert!(PHONE_PATTERN.is_match(ok), "{} should match", ok);
        }
        for bad in ["", "+0911234567", "+251", "abc12345", "+1234567890123456789"] {
            assert!(!PHONE_PATTERN.is_match(bad), "{} should not match", bad);
        }

        // 15 characters after the leading digit is the upper bound
        assert!(PHONE_PATTERN.is_match("+2123456789012345"));
        assert!(!PHONE_PATTERN.is_match("+21234567890123456"));
        assert!(!PHONE_PATTERN.is_match("+251 (11) 551-2345"));
    }

    #[test]
    fn test_invalid_mobile_number() {
        let err = validate_registration(&with("mobileNumber", json!("+251"))).unwrap_err();
        assert_eq!(fields_of(&err), vec!["mobileNumber"]);
        assert_eq!(err.issues[0].message, "Please enter a valid mobile number");

        // Too short and not matching: both rules reported
        let err = validate_registration(&with("mobileNumber", json!("+1"))).unwrap_err();
        assert_eq!(fields_of(&err), vec!["mobileNumber", "mobileNumber"]);
    }

    #[test]
    fn test_invalid_office_phone() {
        let err = validate_registration(&with("officePhone", json!("phone"))).unwrap_err();
        assert_eq!(fields_of(&err), vec!["officePhone"]);
        assert_eq!(err.issues[0].message, "Please enter a valid office phone number");
    }

    #[test]
    fn test_invalid_email() {
        for bad in ["", "not-an-email", "a@", "@b.com"] {
            let err = validate_registration(&with("email", json!(bad))).unwrap_err();
            assert_eq!(fields_of(&err), vec!["email"], "{:?}", bad);
        }
    }

    #[test]
    fn test_invalid_website() {
        let err = validate_registration(&with("website", json!("not a url"))).unwrap_err();
        assert_eq!(fields_of(&err), vec!["website"]);
        assert_eq!(err.issues[0].message, "Please enter a valid website URL");

        assert!(validate_registration(&with("website", json!("http://"))).is_ok());
        assert!(validate_registration(&with("website", json!(""))).is_ok());
    }

    #[test]
    fn test_follow_up_is_required_boolean() {
        let err = validate_registration(&without("followUp")).unwrap_err();
        assert_eq!(fields_of(&err), vec!["followUp"]);
        assert_eq!(err.issues[0].message, "Required");

        let err = validate_registration(&with("followUp", json!("yes"))).unwrap_err();
        assert_eq!(err.issues[0].message, "Expected boolean, received string");
    }

    #[test]
    fn test_missing_required_field_reports_once() {
        let err = validate_registration(&without("name")).unwrap_err();

        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].code, "invalid_type");
        assert_eq!(err.issues[0].message, "Required");
    }

    #[test]
    fn test_wrong_type() {
        let err = validate_registration(&with("country", json!(42))).unwrap_err();
        assert_eq!(fields_of(&err), vec!["country"]);
        assert_eq!(err.issues[0].message, "Expected string, received number");
    }

    #[test]
    fn test_issues_are_collected_in_field_order() {
        let mut input = with("officeAddress", json!("short"));
        input["name"] = json!("A");
        input["email"] = json!("nope");
        input.as_object_mut().unwrap().remove("followUp");

        let err = validate_registration(&input).unwrap_err();
        assert_eq!(fields_of(&err), vec!["name", "email", "officeAddress", "followUp"]);
    }

    #[test]
    fn test_non_object_input() {
        let err = validate_registration(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert!(err.issues[0].path.is_empty());
        assert_eq!(err.issues[0].message, "Expected object, received array");
    }

    #[test]
    fn test_validate_form_matches_json_validation() {
        let form: RegistrationForm = serde_json::from_value(valid_input()).unwrap();
        let from_form = validate_form(&form).unwrap();
        let from_json = validate_registration(&valid_input()).unwrap();
        assert_eq!(from_form, from_json);

        let bad = RegistrationForm {
            office_address: "short".into(),
            ..form
        };
        assert!(validate_form(&bad).unwrap_err().has_field("officeAddress"));
    }

    #[test]
    fn test_issue_serialization() {
        let issue = FieldIssue::new("officeAddress", "too short", "too_small");
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["path"], json!(["officeAddress"]));
        assert_eq!(json["message"], "too short");
        assert_eq!(json["code"], "too_small");
    }
}
