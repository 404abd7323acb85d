//! Application wiring coverage: routing, body limit and middleware order.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use async_trait::async_trait;
use rstest::rstest;

use backend::domain::ports::ContactSubmissionCommand;
use backend::domain::{ContactDraft, ContactValidationError, SubmissionReceipt, TRACE_ID_HEADER};
use backend::inbound::http::ContactResponse;
use backend::inbound::http::state::HttpState;

use super::{ServerConfig, build_app};

struct AlwaysDelivered;

#[async_trait]
impl ContactSubmissionCommand for AlwaysDelivered {
    async fn submit(&self, _: ContactDraft) -> Result<SubmissionReceipt, ContactValidationError> {
        Ok(SubmissionReceipt::Delivered)
    }
}

fn state() -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(AlwaysDelivered)))
}

const BODY: &str = r#"{"fullName":"Jane Doe","email":"jane@example.com","company":"Acme","interest":"rag-llm"}"#;

#[rstest]
#[actix_web::test]
async fn contact_route_is_mounted_under_api() {
    let app = actix_test::init_service(build_app(state(), 1024)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/contact")
        .set_payload(BODY)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: ContactResponse = actix_test::read_body_json(response).await;
    assert_eq!(body.message, "Consultation request sent successfully");
}

#[rstest]
#[actix_web::test]
async fn oversized_body_is_refused() {
    let app = actix_test::init_service(build_app(state(), 16)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/contact")
        .set_payload(BODY)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[rstest]
#[case::get(actix_test::TestRequest::get())]
#[case::put(actix_test::TestRequest::put())]
#[actix_web::test]
async fn other_methods_are_refused(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(build_app(state(), 1024)).await;

    let response = actix_test::call_service(&app, request.uri("/api/contact").to_request()).await;

    assert!(response.status().is_client_error());
}

#[cfg(debug_assertions)]
#[rstest]
#[actix_web::test]
async fn openapi_document_is_served_in_debug_builds() {
    let app = actix_test::init_service(build_app(state(), 1024)).await;

    let request = actix_test::TestRequest::get()
        .uri("/api-docs/openapi.json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[rstest]
fn payload_limit_defaults_to_64_kib() {
    let config = ServerConfig::new("127.0.0.1", 0, Arc::new(AlwaysDelivered));
    assert_eq!(config.payload_limit, 64 * 1024);

    let config = config.with_payload_limit(512);
    assert_eq!(config.payload_limit, 512);
}
