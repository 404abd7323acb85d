//! HTTP mapping for rejected consultation requests.
//!
//! Validation is the only failure a requester can see. Storage and mail
//! failures never reach this layer.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ContactValidationError, TRACE_ID_HEADER, TraceId};

/// JSON envelope shared by every contact endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactResponse {
    /// `true` when the request was accepted.
    pub success: bool,
    /// Human-readable outcome or the first validation failure.
    #[schema(example = "Consultation request sent successfully")]
    pub message: String,
}

/// A request refused before any side effect ran.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(transparent)]
pub struct ContactRejection(#[from] pub ContactValidationError);

impl ResponseError for ContactRejection {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        let field = self.0.field().map(|field| field.wire_name());
        debug!(?field, reason = %self.0, "contact request rejected");

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = TraceId::current() {
            builder.insert_header((TRACE_ID_HEADER, id.to_string()));
        }
        builder.json(ContactResponse {
            success: false,
            message: self.0.to_string(),
        })
    }
}

#[cfg(test)]
mod tests;
