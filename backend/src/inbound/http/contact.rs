//! Consultation request endpoint.
//!
//! ```text
//! POST /api/contact  Submit a consultation request
//! ```
//!
//! The body is read as raw bytes and inspected as a JSON value, so malformed
//! payloads get the same `{ success, message }` envelope as field errors
//! instead of a framework-generated response.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{ContactDraft, ContactField, ContactValidationError, DraftField};
use crate::inbound::http::error::{ContactRejection, ContactResponse};
use crate::inbound::http::state::HttpState;

/// Consultation request body.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[schema(example = "Jane Doe", max_length = 256)]
    pub full_name: String,
    #[schema(example = "jane@example.com", max_length = 320)]
    pub email: String,
    #[schema(example = "Acme Ltd", max_length = 256)]
    pub company: String,
    /// One of `custom-lora`, `rag-llm`, `penetration-testing`,
    /// `surface-monitoring` or `complete-platform`.
    #[schema(example = "penetration-testing")]
    pub interest: String,
    #[schema(max_length = 5000)]
    pub message: Option<String>,
}

fn draft_field(fields: &Map<String, Value>, field: ContactField) -> DraftField {
    match fields.get(field.wire_name()) {
        None | Some(Value::Null) => DraftField::Absent,
        Some(Value::String(text)) => DraftField::Text(text.clone()),
        Some(_) => DraftField::NotText,
    }
}

/// Extract the form fields from a raw request body.
///
/// Anything other than a JSON object is a [`ContactValidationError::MalformedBody`].
pub fn draft_from_body(body: &[u8]) -> Result<ContactDraft, ContactValidationError> {
    let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
        return Err(ContactValidationError::MalformedBody);
    };
    Ok(ContactDraft {
        full_name: draft_field(&fields, ContactField::FullName),
        email: draft_field(&fields, ContactField::Email),
        company: draft_field(&fields, ContactField::Company),
        interest: draft_field(&fields, ContactField::Interest),
        message: draft_field(&fields, ContactField::Message),
    })
}

/// Submit a consultation request.
///
/// Valid requests always succeed: storage and email failures are logged and
/// only change the wording of the success message.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Request accepted", body = ContactResponse),
        (status = 400, description = "Invalid request", body = ContactResponse)
    ),
    tags = ["contact"],
    operation_id = "submitContact"
)]
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> Result<web::Json<ContactResponse>, ContactRejection> {
    let draft = draft_from_body(&body)?;
    let receipt = state.contact.submit(draft).await?;
    Ok(web::Json(ContactResponse {
        success: true,
        message: receipt.message().to_owned(),
    }))
}
