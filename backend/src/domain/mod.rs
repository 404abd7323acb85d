//! Domain types and services.
//!
//! Purpose: model consultation requests and the submission pipeline without
//! reference to HTTP, SQL or SMTP. Adapters reach infrastructure through the
//! traits in [`ports`].
//!
//! Public surface:
//! - `ContactSubmission` and friends: validated consultation requests.
//! - `ContactSubmissionService`: the validate → persist → notify pipeline.
//! - `NotificationDispatcher`: concurrent, deadline-bounded email fan-out.
//! - `User`: storage-only user records.
//! - `TraceId`: request correlation identifier.

pub mod contact;
pub mod contact_service;
pub mod notification;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::contact::{
    ContactDraft, ContactField, ContactId, ContactSubmission, ContactValidationError, DraftField,
    InterestArea, StoredContact,
};
pub use self::contact_service::{ContactSubmissionService, SubmissionReceipt};
pub use self::notification::{
    DEFAULT_NOTIFICATION_TIMEOUT, DeliveryFailure, NotificationDispatcher, NotificationFailure,
    NotificationKind, NotificationSettings, OutboundEmail,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Credential, NewUser, User, UserId, UserValidationError, Username};
