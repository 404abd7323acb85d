//! Outbound mail relay adapters.

mod smtp;

pub use smtp::{SmtpMailTransport, SmtpSetupError};
