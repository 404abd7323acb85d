//! Consultation request notifications.
//!
//! Each accepted submission produces two emails: an alert for the operator and
//! a confirmation for the requester. [`NotificationDispatcher`] sends both at
//! once and bounds the pair with a single deadline.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join;
use maud::{Markup, html};
use tokio::time::timeout;
use tracing::debug;

use super::ports::{MailTransport, MailTransportError};
use super::ContactSubmission;

/// Which of the two notifications a message is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    OperatorAlert,
    RequesterConfirmation,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OperatorAlert => "operator alert",
            Self::RequesterConfirmation => "requester confirmation",
        })
    }
}

/// A fully rendered email ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub kind: NotificationKind,
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Addresses and deadline used when notifying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    /// Inbox receiving operator alerts.
    pub operator_address: String,
    /// `From` address on both messages.
    pub sender_address: String,
    /// Overall deadline covering both sends.
    pub timeout: Duration,
}

/// Default overall notification deadline.
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(30);

/// One message the transport failed to deliver.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} to {recipient}: {error}")]
pub struct DeliveryFailure {
    pub kind: NotificationKind,
    pub recipient: String,
    pub error: MailTransportError,
}

/// Why notifying about a submission did not fully succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationFailure {
    /// The deadline elapsed before both sends settled.
    #[error("notifications abandoned after {}ms", .timeout.as_millis())]
    TimedOut { timeout: Duration },
    /// At least one send settled with an error.
    #[error("{} of 2 notifications failed: {}", .failures.len(), summarise(.failures))]
    Undelivered { failures: Vec<DeliveryFailure> },
}

fn summarise(failures: &[DeliveryFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Sends the operator alert and requester confirmation for a submission.
#[derive(Clone)]
pub struct NotificationDispatcher {
    transport: Arc<dyn MailTransport>,
    settings: NotificationSettings,
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>, settings: NotificationSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }

    /// Send both notifications concurrently under the configured deadline.
    ///
    /// When the deadline fires the in-flight sends are dropped; whatever the
    /// relay does with them afterwards is never observed.
    pub async fn dispatch(&self, submission: &ContactSubmission) -> Result<(), NotificationFailure> {
        let alert = operator_alert(submission, &self.settings);
        let confirmation = requester_confirmation(submission, &self.settings);

        let sends = join(
            self.transport.send(&alert),
            self.transport.send(&confirmation),
        );
        let (alert_result, confirmation_result) = timeout(self.settings.timeout, sends)
            .await
            .map_err(|_| NotificationFailure::TimedOut {
                timeout: self.settings.timeout,
            })?;

        let failures: Vec<DeliveryFailure> = [(alert, alert_result), (confirmation, confirmation_result)]
            .into_iter()
            .filter_map(|(email, result)| {
                result.err().map(|error| DeliveryFailure {
                    kind: email.kind,
                    recipient: email.to,
                    error,
                })
            })
            .collect();

        if failures.is_empty() {
            debug!("consultation notifications delivered");
            Ok(())
        } else {
            Err(NotificationFailure::Undelivered { failures })
        }
    }
}

/// Render the alert sent to the operator inbox.
pub fn operator_alert(submission: &ContactSubmission, settings: &NotificationSettings) -> OutboundEmail {
    let html_body = html! {
        h2 { "New Enterprise Consultation Request" }
        p { strong { "Name:" } " " (submission.full_name()) }
        p { strong { "Email:" } " " (submission.email()) }
        p { strong { "Company:" } " " (submission.company()) }
        p { strong { "Interest Area:" } " " (submission.interest().label()) }
        @if let Some(text) = submission.message() {
            p {
                strong { "Message:" }
                br;
                (multiline(text))
            }
        }
        hr;
        p { em { "Sent from vSecureBytes contact form" } }
    };

    OutboundEmail {
        kind: NotificationKind::OperatorAlert,
        from: settings.sender_address.clone(),
        to: settings.operator_address.clone(),
        subject: format!(
            "New Consultation Request from {}",
            single_line(submission.company())
        ),
        html_body: html_body.into_string(),
    }
}

/// Render the acknowledgement sent to the requester.
pub fn requester_confirmation(
    submission: &ContactSubmission,
    settings: &NotificationSettings,
) -> OutboundEmail {
    let html_body = html! {
        h2 { "Thank you for contacting vSecureBytes" }
        p { "Dear " (submission.full_name()) "," }
        p {
            "We have received your consultation request for "
            strong { (submission.interest().label()) }
            "."
        }
        p {
            "Our enterprise team will review your requirements and contact you within 24 hours \
             to schedule a personalized consultation."
        }
        br;
        p { "Best regards," br; "The vSecureBytes Team" }
        hr;
        p { em { "This is an automated confirmation. Please do not reply to this email." } }
    };

    OutboundEmail {
        kind: NotificationKind::RequesterConfirmation,
        from: settings.sender_address.clone(),
        to: submission.email().to_owned(),
        subject: "Thank you for your interest in vSecureBytes".to_owned(),
        html_body: html_body.into_string(),
    }
}

// Each line is escaped; line breaks become `<br>`.
fn multiline(text: &str) -> Markup {
    html! {
        @for (index, line) in text.lines().enumerate() {
            @if index > 0 { br; }
            (line)
        }
    }
}

// Header values must not carry line breaks.
fn single_line(raw: &str) -> String {
    raw.split(['\r', '\n'])
        .filter(|part| !part.trim().is_empty())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(" ")
}
