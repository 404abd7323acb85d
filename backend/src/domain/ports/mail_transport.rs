//! Port for the outbound mail relay.
//!
//! The transport is treated as unreliable and possibly slow: callers bound
//! every send with their own deadline and never assume delivery.

use async_trait::async_trait;

use crate::domain::OutboundEmail;

use super::define_port_error;

define_port_error! {
    /// Failures reported by mail transport adapters.
    pub enum MailTransportError {
        /// The message could not be assembled (bad address, header, body).
        InvalidMessage { message: String } => "email could not be built: {message}",
        /// The relay could not be reached or refused the session.
        Connection { message: String } => "mail relay unavailable: {message}",
        /// The relay accepted the session but rejected the message.
        Rejected { message: String } => "mail relay rejected message: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand one message to the relay.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailTransportError>;
}
