//! Consultation request data model and input validation.
//!
//! A [`ContactSubmission`] is only ever produced by [`ContactSubmission::parse`],
//! so holding one proves every field passed validation. Submissions are
//! immutable; persistence wraps them in a [`StoredContact`] once an id and
//! creation timestamp have been assigned.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Serialize};

/// Maximum characters accepted for the requester's name.
pub const FULL_NAME_MAX: usize = 256;
/// Maximum characters accepted for an email address.
pub const EMAIL_MAX: usize = 320;
/// Maximum characters accepted for the company name.
pub const COMPANY_MAX: usize = 256;
/// Maximum characters accepted for the free-text message.
pub const MESSAGE_MAX: usize = 5000;

/// Fields of the consultation request form, in validation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    FullName,
    Email,
    Company,
    Interest,
    Message,
}

impl ContactField {
    /// Wire name of the field in request payloads.
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Company => "company",
            Self::Interest => "interest",
            Self::Message => "message",
        }
    }

    /// Human-readable label used in validation messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::Company => "Company",
            Self::Interest => "Interest area",
            Self::Message => "Message",
        }
    }
}

/// Validation failures for a consultation request.
///
/// The `Display` output is returned verbatim to the requester, so each message
/// names the offending field in plain language.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    /// The body was not a JSON object.
    #[error("Request body must be a JSON object")]
    MalformedBody,
    /// A required field was absent or blank.
    #[error("{} is required", .field.label())]
    Missing { field: ContactField },
    /// A field carried a non-string JSON value.
    #[error("{} must be a string", .field.label())]
    NotText { field: ContactField },
    /// A field exceeded its length bound.
    #[error("{} must be at most {max} characters", .field.label())]
    TooLong { field: ContactField, max: usize },
    /// The email address does not match the address grammar.
    #[error("Please enter a valid email address")]
    InvalidEmail,
    /// The interest is not one of the offered services.
    #[error("Please select a valid interest area")]
    UnknownInterest,
}

impl ContactValidationError {
    /// The field that failed validation, if the failure concerns one.
    pub const fn field(&self) -> Option<ContactField> {
        match self {
            Self::MalformedBody => None,
            Self::Missing { field } | Self::NotText { field } | Self::TooLong { field, .. } => {
                Some(*field)
            }
            Self::InvalidEmail => Some(ContactField::Email),
            Self::UnknownInterest => Some(ContactField::Interest),
        }
    }
}

/// Service categories a requester can enquire about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterestArea {
    #[serde(alias = "custom-model-training")]
    CustomLora,
    #[serde(alias = "knowledge-base-application")]
    RagLlm,
    PenetrationTesting,
    #[serde(alias = "external-monitoring")]
    SurfaceMonitoring,
    #[serde(alias = "full-platform")]
    CompletePlatform,
}

impl InterestArea {
    /// Every offered interest area.
    pub const ALL: [Self; 5] = [
        Self::CustomLora,
        Self::RagLlm,
        Self::PenetrationTesting,
        Self::SurfaceMonitoring,
        Self::CompletePlatform,
    ];

    /// Canonical wire and storage value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CustomLora => "custom-lora",
            Self::RagLlm => "rag-llm",
            Self::PenetrationTesting => "penetration-testing",
            Self::SurfaceMonitoring => "surface-monitoring",
            Self::CompletePlatform => "complete-platform",
        }
    }

    /// Display label shown to people in emails.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CustomLora => "Custom LoRA Models",
            Self::RagLlm => "RAG+LLM Applications",
            Self::PenetrationTesting => "Penetration Testing",
            Self::SurfaceMonitoring => "External Surface Monitoring",
            Self::CompletePlatform => "Complete Platform",
        }
    }

    const fn alias(self) -> Option<&'static str> {
        match self {
            Self::CustomLora => Some("custom-model-training"),
            Self::RagLlm => Some("knowledge-base-application"),
            Self::PenetrationTesting => None,
            Self::SurfaceMonitoring => Some("external-monitoring"),
            Self::CompletePlatform => Some("full-platform"),
        }
    }
}

impl fmt::Display for InterestArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterestArea {
    type Err = ContactValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|area| area.as_str() == value || area.alias() == Some(value))
            .ok_or(ContactValidationError::UnknownInterest)
    }
}

/// One raw form field as it arrived in the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftField {
    /// Absent or `null`.
    #[default]
    Absent,
    Text(String),
    /// Present with a non-string value.
    NotText,
}

impl DraftField {
    fn into_text(self, field: ContactField) -> Result<Option<String>, ContactValidationError> {
        match self {
            Self::Absent => Ok(None),
            Self::Text(text) => Ok(Some(text)),
            Self::NotText => Err(ContactValidationError::NotText { field }),
        }
    }
}

impl From<&str> for DraftField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DraftField {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Option<String>> for DraftField {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }
}

/// Raw consultation request fields as extracted from a request body.
///
/// Nothing here is validated; pass it to [`ContactSubmission::parse`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub full_name: DraftField,
    pub email: DraftField,
    pub company: DraftField,
    pub interest: DraftField,
    pub message: DraftField,
}

/// A validated consultation request.
///
/// ## Invariants
/// - `full_name`, `email` and `company` are trimmed, non-empty and within
///   their length bounds.
/// - `email` satisfies the RFC 5322 address grammar.
/// - `message`, when present, is trimmed, non-empty and at most
///   [`MESSAGE_MAX`] characters.
///
/// # Examples
/// ```
/// use backend::domain::{ContactDraft, ContactSubmission, DraftField, InterestArea};
///
/// let submission = ContactSubmission::parse(ContactDraft {
///     full_name: "Jane Doe".into(),
///     email: "jane@example.com".into(),
///     company: "Acme".into(),
///     interest: "penetration-testing".into(),
///     message: DraftField::Absent,
/// })
/// .expect("valid submission");
/// assert_eq!(submission.interest(), InterestArea::PenetrationTesting);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    full_name: String,
    email: String,
    company: String,
    interest: InterestArea,
    message: Option<String>,
}

impl ContactSubmission {
    /// Validate a draft, reporting the first offending field.
    ///
    /// Fields are checked in form order: full name, email, company,
    /// interest, message.
    pub fn parse(draft: ContactDraft) -> Result<Self, ContactValidationError> {
        let ContactDraft {
            full_name,
            email,
            company,
            interest,
            message,
        } = draft;

        let full_name = required(full_name, ContactField::FullName, FULL_NAME_MAX)?;
        let email = required(email, ContactField::Email, EMAIL_MAX)?;
        if !EmailAddress::is_valid(&email) {
            return Err(ContactValidationError::InvalidEmail);
        }
        let company = required(company, ContactField::Company, COMPANY_MAX)?;
        let interest = required_text(interest, ContactField::Interest)?.parse()?;
        let message = optional(message, ContactField::Message, MESSAGE_MAX)?;

        Ok(Self {
            full_name,
            email,
            company,
            interest,
            message,
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn interest(&self) -> InterestArea {
        self.interest
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Rebuild a submission from values that were validated before storage.
    pub(crate) fn from_trusted(
        full_name: String,
        email: String,
        company: String,
        interest: InterestArea,
        message: Option<String>,
    ) -> Self {
        Self {
            full_name,
            email,
            company,
            interest,
            message,
        }
    }
}

fn trimmed(value: DraftField, field: ContactField) -> Result<Option<String>, ContactValidationError> {
    Ok(value
        .into_text(field)?
        .map(|raw| raw.trim().to_owned())
        .filter(|text| !text.is_empty()))
}

fn required_text(value: DraftField, field: ContactField) -> Result<String, ContactValidationError> {
    trimmed(value, field)?.ok_or(ContactValidationError::Missing { field })
}

fn within_bound(
    text: String,
    field: ContactField,
    max: usize,
) -> Result<String, ContactValidationError> {
    if text.chars().count() > max {
        return Err(ContactValidationError::TooLong { field, max });
    }
    Ok(text)
}

fn required(
    value: DraftField,
    field: ContactField,
    max: usize,
) -> Result<String, ContactValidationError> {
    within_bound(required_text(value, field)?, field, max)
}

fn optional(
    value: DraftField,
    field: ContactField,
    max: usize,
) -> Result<Option<String>, ContactValidationError> {
    trimmed(value, field)?
        .map(|text| within_bound(text, field, max))
        .transpose()
}

/// Surrogate key assigned by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(i32);

impl ContactId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A submission as recorded by a persistence adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredContact {
    pub id: ContactId,
    pub submission: ContactSubmission,
    pub created_at: DateTime<Utc>,
}
