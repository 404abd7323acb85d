//! Builders wiring storage and mail adapters into the submission pipeline.

use std::sync::Arc;

use backend::domain::ports::{ContactSubmissionCommand, MailTransport};
use backend::domain::{ContactSubmissionService, NotificationDispatcher, NotificationSettings};
use backend::outbound::persistence::Storage;

/// Build the consultation pipeline over the selected storage and transport.
pub fn build_contact_command(
    storage: &Storage,
    transport: Arc<dyn MailTransport>,
    notifications: NotificationSettings,
) -> Arc<dyn ContactSubmissionCommand> {
    let dispatcher = NotificationDispatcher::new(transport, notifications);
    Arc::new(ContactSubmissionService::new(
        storage.contacts.clone(),
        dispatcher,
    ))
}
