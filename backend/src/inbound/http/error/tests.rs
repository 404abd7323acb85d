//! Tests for rejection responses.

use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::rstest;

use super::*;
use crate::domain::ContactField;

async fn body_of(rejection: &ContactRejection) -> (StatusCode, ContactResponse) {
    let response = ResponseError::error_response(rejection);
    let status = response.status();
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("response JSON deserialisation succeeds");
    (status, body)
}

#[rstest]
#[case::missing(
    ContactValidationError::Missing { field: ContactField::Company },
    "Company is required"
)]
#[case::email(ContactValidationError::InvalidEmail, "Please enter a valid email address")]
#[case::malformed(ContactValidationError::MalformedBody, "Request body must be a JSON object")]
#[actix_web::test]
async fn rejections_are_bad_requests_with_the_reason(
    #[case] error: ContactValidationError,
    #[case] message: &str,
) {
    let (status, body) = body_of(&ContactRejection(error)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        ContactResponse {
            success: false,
            message: message.to_owned(),
        }
    );
}

#[rstest]
#[actix_web::test]
async fn rejection_carries_the_scoped_trace_id() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
        .parse()
        .expect("valid UUID");

    let response = TraceId::scope(trace_id, async {
        ResponseError::error_response(&ContactRejection(ContactValidationError::InvalidEmail))
    })
    .await;

    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace id header")
        .to_str()
        .expect("ascii header");
    assert_eq!(header, trace_id.to_string());
}
