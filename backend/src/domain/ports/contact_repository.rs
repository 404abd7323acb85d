//! Port for consultation request persistence.
//!
//! Adapters assign the surrogate key and creation timestamp on insert. Keys
//! increase monotonically, so listing by key is listing by creation order.

use async_trait::async_trait;

use crate::domain::{ContactId, ContactSubmission, StoredContact};

use super::define_port_error;

define_port_error! {
    /// Storage failures raised by contact repository adapters.
    pub enum ContactPersistenceError {
        /// No connection to the store could be obtained.
        Connection { message: String } => "contact storage unavailable: {message}",
        /// The statement failed while executing.
        Query { message: String } => "contact storage query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Record a submission, returning it with its generated key and timestamp.
    async fn create(
        &self,
        submission: &ContactSubmission,
    ) -> Result<StoredContact, ContactPersistenceError>;

    /// Fetch a stored submission by key.
    async fn find_by_id(
        &self,
        id: ContactId,
    ) -> Result<Option<StoredContact>, ContactPersistenceError>;

    /// All stored submissions, oldest first.
    async fn list(&self) -> Result<Vec<StoredContact>, ContactPersistenceError>;
}
