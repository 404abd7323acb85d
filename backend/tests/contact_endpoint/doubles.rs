//! Mail and storage doubles for the contact endpoint tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backend::domain::ports::{
    ContactPersistenceError, ContactRepository, MailTransport, MailTransportError,
};
use backend::domain::{ContactId, ContactSubmission, OutboundEmail, StoredContact};

/// Records every message handed to it and reports success.
#[derive(Clone, Default)]
pub struct RecordingMailTransport {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl RecordingMailTransport {
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().expect("sent lock").clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailTransportError> {
        self.sent.lock().expect("sent lock").push(email.clone());
        Ok(())
    }
}

/// Refuses every message as if the relay were down.
pub struct FailingMailTransport;

#[async_trait]
impl MailTransport for FailingMailTransport {
    async fn send(&self, _: &OutboundEmail) -> Result<(), MailTransportError> {
        Err(MailTransportError::connection("connection refused"))
    }
}

/// Never completes a send.
pub struct HangingMailTransport;

#[async_trait]
impl MailTransport for HangingMailTransport {
    async fn send(&self, _: &OutboundEmail) -> Result<(), MailTransportError> {
        std::future::pending().await
    }
}

/// Storage whose every operation fails.
pub struct UnavailableContactRepository;

#[async_trait]
impl ContactRepository for UnavailableContactRepository {
    async fn create(&self, _: &ContactSubmission) -> Result<StoredContact, ContactPersistenceError> {
        Err(ContactPersistenceError::connection("pool exhausted"))
    }

    async fn find_by_id(
        &self,
        _: ContactId,
    ) -> Result<Option<StoredContact>, ContactPersistenceError> {
        Err(ContactPersistenceError::connection("pool exhausted"))
    }

    async fn list(&self) -> Result<Vec<StoredContact>, ContactPersistenceError> {
        Err(ContactPersistenceError::connection("pool exhausted"))
    }
}
