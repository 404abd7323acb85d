//! Builds the consultation app over caller-supplied adapters.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use backend::Trace;
use backend::domain::ports::{ContactRepository, MailTransport};
use backend::domain::{
    ContactSubmissionService, NotificationDispatcher, NotificationSettings, TRACE_ID_HEADER,
};
use backend::inbound::http::ContactResponse;
use backend::inbound::http::contact::submit_contact;
use backend::inbound::http::state::HttpState;
use serde_json::Value;

pub const OPERATOR: &str = "ops@vsecurebytes.test";
pub const SENDER: &str = "noreply@vsecurebytes.test";

/// Outcome of one request against the app.
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: ContactResponse,
}

pub fn settings(timeout: Duration) -> NotificationSettings {
    NotificationSettings {
        operator_address: OPERATOR.into(),
        sender_address: SENDER.into(),
        timeout,
    }
}

pub async fn post_contact(
    contacts: Arc<dyn ContactRepository>,
    transport: Arc<dyn MailTransport>,
    timeout: Duration,
    body: &Value,
) -> Reply {
    let dispatcher = NotificationDispatcher::new(transport, settings(timeout));
    let service = ContactSubmissionService::new(contacts, dispatcher);
    let state = web::Data::new(HttpState::new(Arc::new(service)));
    let app = test::init_service(
        App::new()
            .app_data(state)
            .wrap(Trace)
            .service(web::scope("/api").service(submit_contact)),
    )
    .await;

    let request = test::TestRequest::post()
        .uri("/api/contact")
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_string())
        .to_request();
    let response = test::call_service(&app, request).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = test::read_body_json(response).await;
    Reply {
        status,
        trace_id,
        body,
    }
}
