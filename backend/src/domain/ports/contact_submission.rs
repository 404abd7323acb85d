//! Driving port for consultation request submission.
//!
//! The HTTP adapter only sees this trait, so handler tests can swap in a
//! double without wiring storage or mail.

use async_trait::async_trait;

use crate::domain::{ContactDraft, ContactValidationError, SubmissionReceipt};

/// Use-case port for `POST /api/contact`.
///
/// Only validation failures are reported as errors. Storage and notification
/// failures are absorbed by the implementation and surface as a
/// [`SubmissionReceipt`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactSubmissionCommand: Send + Sync {
    async fn submit(&self, draft: ContactDraft) -> Result<SubmissionReceipt, ContactValidationError>;
}
