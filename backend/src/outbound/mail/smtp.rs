//! SMTP-backed `MailTransport` built on `lettre`.
//!
//! Port 465 uses implicit TLS; every other port connects in plain text and
//! upgrades with STARTTLS. Connections are pooled and reused across sends.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::domain::OutboundEmail;
use crate::domain::ports::{MailTransport, MailTransportError};
use crate::settings::MailConfig;

/// Errors raised while configuring the relay connection.
#[derive(Debug, thiserror::Error)]
#[error("invalid SMTP relay {host}: {source}")]
pub struct SmtpSetupError {
    host: String,
    #[source]
    source: lettre::transport::smtp::Error,
}

/// Mail transport speaking SMTP to the configured relay.
#[derive(Clone)]
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Configure the relay. No connection is opened until the first send.
    pub fn new(config: &MailConfig) -> Result<Self, SmtpSetupError> {
        let builder = if config.implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|source| SmtpSetupError {
            host: config.host.clone(),
            source,
        })?
        .port(config.port)
        .timeout(Some(config.timeout));

        let builder = match &config.credentials {
            Some(login) => builder.credentials(Credentials::new(
                login.user.clone(),
                login.password.as_str().to_owned(),
            )),
            None => builder,
        };

        Ok(Self {
            transport: builder.build(),
        })
    }
}

fn mailbox(address: &str, role: &str) -> Result<Mailbox, MailTransportError> {
    address
        .parse()
        .map_err(|err| MailTransportError::invalid_message(format!("{role} address: {err}")))
}

/// Assemble the MIME message for one outbound email.
pub(crate) fn build_message(email: &OutboundEmail) -> Result<Message, MailTransportError> {
    Message::builder()
        .from(mailbox(&email.from, "from")?)
        .to(mailbox(&email.to, "to")?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_HTML)
        .body(email.html_body.clone())
        .map_err(|err| MailTransportError::invalid_message(err.to_string()))
}

fn map_smtp_error(error: &lettre::transport::smtp::Error) -> MailTransportError {
    if error.is_permanent() || error.is_transient() {
        MailTransportError::rejected(error.to_string())
    } else {
        MailTransportError::connection(error.to_string())
    }
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailTransportError> {
        let message = build_message(email)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|err| map_smtp_error(&err))?;
        debug!(
            kind = %email.kind,
            code = %response.code(),
            "relay accepted message"
        );
        Ok(())
    }
}
