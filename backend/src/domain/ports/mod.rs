//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`ContactRepository`, `UserRepository`, `MailTransport`) are
//! implemented by outbound adapters. The driving port
//! (`ContactSubmissionCommand`) is what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_repository;
mod contact_submission;
mod mail_transport;
mod user_repository;

#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactPersistenceError, ContactRepository};
#[cfg(test)]
pub use contact_submission::MockContactSubmissionCommand;
pub use contact_submission::ContactSubmissionCommand;
#[cfg(test)]
pub use mail_transport::MockMailTransport;
pub use mail_transport::{MailTransport, MailTransportError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
