//! Consultation request pipeline.
//!
//! validate → persist (best-effort) → notify (bounded) → receipt.
//!
//! Only validation failures reach the caller. Storage and email failures are
//! logged and the requester still gets a success receipt.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use super::notification::{NotificationDispatcher, NotificationFailure};
use super::ports::{ContactRepository, ContactSubmissionCommand};
use super::{ContactDraft, ContactSubmission, ContactValidationError};

/// Successful outcome of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionReceipt {
    /// Both notifications were handed to the relay.
    Delivered,
    /// The request was accepted but at least one notification did not go
    /// out in time.
    Accepted,
}

impl SubmissionReceipt {
    /// Message returned to the requester.
    pub const fn message(self) -> &'static str {
        match self {
            Self::Delivered => "Consultation request sent successfully",
            Self::Accepted => "Consultation request received successfully",
        }
    }
}

/// Default implementation of [`ContactSubmissionCommand`].
#[derive(Clone)]
pub struct ContactSubmissionService {
    contacts: Arc<dyn ContactRepository>,
    notifications: NotificationDispatcher,
}

impl ContactSubmissionService {
    pub fn new(contacts: Arc<dyn ContactRepository>, notifications: NotificationDispatcher) -> Self {
        Self {
            contacts,
            notifications,
        }
    }

    async fn record(&self, submission: &ContactSubmission) {
        match self.contacts.create(submission).await {
            Ok(stored) => info!(
                contact_id = %stored.id,
                interest = %submission.interest(),
                "consultation request recorded"
            ),
            Err(err) => warn!(
                error = %err,
                interest = %submission.interest(),
                "consultation request not recorded; continuing with notifications"
            ),
        }
    }

    async fn notify(&self, submission: &ContactSubmission) -> SubmissionReceipt {
        match self.notifications.dispatch(submission).await {
            Ok(()) => SubmissionReceipt::Delivered,
            Err(failure @ NotificationFailure::TimedOut { .. }) => {
                error!(error = %failure, "consultation notifications timed out");
                SubmissionReceipt::Accepted
            }
            Err(NotificationFailure::Undelivered { failures }) => {
                for failure in &failures {
                    error!(
                        kind = %failure.kind,
                        recipient = %failure.recipient,
                        error = %failure.error,
                        "consultation notification failed"
                    );
                }
                SubmissionReceipt::Accepted
            }
        }
    }
}

#[async_trait]
impl ContactSubmissionCommand for ContactSubmissionService {
    async fn submit(&self, draft: ContactDraft) -> Result<SubmissionReceipt, ContactValidationError> {
        let submission = ContactSubmission::parse(draft)?;
        self.record(&submission).await;
        Ok(self.notify(&submission).await)
    }
}
