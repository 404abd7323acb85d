//! End-to-end behaviour of `POST /api/contact`.
//!
//! Requests run through the real handler, pipeline and in-memory store with
//! the mail relay replaced by recording, failing and hanging doubles.

#[path = "contact_endpoint/doubles.rs"]
mod doubles;
#[path = "contact_endpoint/harness.rs"]
mod harness;

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix_web::http::StatusCode;
use backend::domain::ports::ContactRepository;
use backend::domain::{InterestArea, NotificationKind};
use backend::outbound::persistence::InMemoryStore;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use doubles::{
    FailingMailTransport, HangingMailTransport, RecordingMailTransport,
    UnavailableContactRepository,
};
use harness::{OPERATOR, SENDER, post_contact};

const DEADLINE: Duration = Duration::from_secs(5);

#[fixture]
fn store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::new(Arc::new(DefaultClock)))
}

fn valid_body() -> Value {
    json!({
        "fullName": "Jane Doe",
        "email": "jane@example.com",
        "company": "Acme Security",
        "interest": "penetration-testing",
        "message": "We need an external assessment."
    })
}

fn without(field: &str) -> Value {
    let mut body = valid_body();
    if let Some(fields) = body.as_object_mut() {
        fields.remove(field);
    }
    body
}

fn with(field: &str, value: Value) -> Value {
    let mut body = valid_body();
    body[field] = value;
    body
}

#[rstest]
#[actix_web::test]
async fn valid_request_notifies_operator_and_requester(store: Arc<InMemoryStore>) {
    let transport = RecordingMailTransport::default();

    let reply = post_contact(store.clone(), Arc::new(transport.clone()), DEADLINE, &valid_body()).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.success);
    assert_eq!(reply.body.message, "Consultation request sent successfully");

    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    let alert = sent
        .iter()
        .find(|email| email.kind == NotificationKind::OperatorAlert)
        .expect("operator alert");
    assert_eq!(alert.to, OPERATOR);
    assert_eq!(alert.from, SENDER);
    assert!(alert.subject.contains("Acme Security"));
    let confirmation = sent
        .iter()
        .find(|email| email.kind == NotificationKind::RequesterConfirmation)
        .expect("requester confirmation");
    assert_eq!(confirmation.to, "jane@example.com");
}

#[rstest]
#[actix_web::test]
async fn valid_request_is_recorded(store: Arc<InMemoryStore>) {
    let body = with("interest", json!("full-platform"));

    let reply = post_contact(
        store.clone(),
        Arc::new(RecordingMailTransport::default()),
        DEADLINE,
        &body,
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);

    let stored = store.list().await.expect("list contacts");
    assert_eq!(stored.len(), 1);
    let contact = &stored[0].submission;
    assert_eq!(contact.full_name(), "Jane Doe");
    assert_eq!(contact.email(), "jane@example.com");
    assert_eq!(contact.company(), "Acme Security");
    assert_eq!(contact.interest(), InterestArea::CompletePlatform);
    assert_eq!(contact.message(), Some("We need an external assessment."));
}

#[rstest]
#[case::full_name(without("fullName"), "Full name is required")]
#[case::email(without("email"), "Email is required")]
#[case::company(without("company"), "Company is required")]
#[case::interest(without("interest"), "Interest area is required")]
#[case::blank_name(with("fullName", json!("   ")), "Full name is required")]
#[case::invalid_email(with("email", json!("not-an-email")), "Please enter a valid email address")]
#[case::unknown_interest(with("interest", json!("quantum-consulting")), "Please select a valid interest area")]
#[case::numeric_company(with("company", json!(42)), "Company must be a string")]
#[case::not_an_object(json!(["Jane Doe"]), "Request body must be a JSON object")]
#[actix_web::test]
async fn invalid_request_is_rejected_without_side_effects(
    store: Arc<InMemoryStore>,
    #[case] body: Value,
    #[case] message: &str,
) {
    let transport = RecordingMailTransport::default();

    let reply = post_contact(store.clone(), Arc::new(transport.clone()), DEADLINE, &body).await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(!reply.body.success);
    assert_eq!(reply.body.message, message);
    assert!(transport.sent().is_empty());
    assert!(store.list().await.expect("list contacts").is_empty());
}

#[rstest]
#[actix_web::test]
async fn hanging_relay_still_answers_by_the_deadline(store: Arc<InMemoryStore>) {
    let timeout = Duration::from_millis(200);
    let started = Instant::now();

    let reply = post_contact(store.clone(), Arc::new(HangingMailTransport), timeout, &valid_body()).await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.success);
    assert_eq!(reply.body.message, "Consultation request received successfully");
    assert_eq!(store.list().await.expect("list contacts").len(), 1);
}

#[rstest]
#[actix_web::test]
async fn failing_relay_is_silent_to_the_requester(store: Arc<InMemoryStore>) {
    let reply = post_contact(store, Arc::new(FailingMailTransport), DEADLINE, &valid_body()).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.success);
    assert_eq!(reply.body.message, "Consultation request received successfully");
}

#[rstest]
#[actix_web::test]
async fn storage_outage_is_silent_to_the_requester() {
    let transport = RecordingMailTransport::default();

    let reply = post_contact(
        Arc::new(UnavailableContactRepository),
        Arc::new(transport.clone()),
        DEADLINE,
        &valid_body(),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body.message, "Consultation request sent successfully");
    assert_eq!(transport.sent().len(), 2);
}

#[rstest]
#[case::accepted(valid_body())]
#[case::rejected(without("email"))]
#[actix_web::test]
async fn every_response_carries_a_trace_id(store: Arc<InMemoryStore>, #[case] body: Value) {
    let reply = post_contact(
        store,
        Arc::new(RecordingMailTransport::default()),
        DEADLINE,
        &body,
    )
    .await;

    let trace_id = reply.trace_id.expect("trace-id header");
    assert!(trace_id.parse::<uuid::Uuid>().is_ok());
}
