//! Outbound mail dispatch.
//!
//! Every transport implements [`Mailer`]. Callers build an [`OutboundEmail`]
//! addressed to a fixed administrative recipient, with the end user's address as
//! `Reply-To`, and hand it to whichever transport the configuration selected.

mod mock;
mod sendgrid;
mod smtp;

pub use mock::MockMailer;
pub use sendgrid::SendGridMailer;
pub use smtp::SmtpMailer;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::config::{MailConfig, MailTransport};
use crate::models::ContactMessage;

/// Errors that can occur when sending mail.
#[derive(Error, Debug)]
pub enum MailError {
    /// The relay or provider could not be reached, or the session broke.
    #[error("Mail transport error: {0}")]
    Transport(String),

    /// Credentials were rejected.
    #[error("Mail authentication failed: {0}")]
    Auth(String),

    /// The relay or provider refused the message.
    #[error("Message rejected: {0}")]
    Rejected(String),

    /// An address could not be parsed.
    #[error("Invalid address: {0}")]
    Address(String),

    /// Submission did not finish in time.
    #[error("Mail submission timed out after {0:?}")]
    Timeout(Duration),

    /// Invalid transport configuration.
    #[error("Invalid mail configuration: {0}")]
    Configuration(String),
}

/// A fully rendered message ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    /// Display name of the sending identity.
    pub from_name: String,
    /// Address replies should go to (the person who filled in the form).
    pub reply_to: String,
    /// Administrative recipient.
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl OutboundEmail {
    /// Renders a contact-form submission addressed to `recipient`.
    pub fn contact(
        message: &ContactMessage,
        from_name: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            from_name: from_name.into(),
            reply_to: message.email.clone(),
            to: recipient.into(),
            subject: ContactMessage::SUBJECT.to_string(),
            text_body: message.plain_body(),
            html_body: message.html_body(),
        }
    }
}

/// Trait for mail transports.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Submits one message. Returns only after the transport accepted it.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError>;

    /// Returns the name of the transport.
    fn name(&self) -> &str;
}

/// A mailer that logs messages via tracing instead of sending them.
#[derive(Debug, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    #[instrument(skip(self, email), fields(mailer = "log"))]
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        info!(
            to = %email.to,
            reply_to = %email.reply_to,
            subject = %email.subject,
            "Mail logged instead of sent"
        );
        debug!(body = %email.text_body, "Mail body");
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

/// Builds the mailer selected by configuration.
pub fn create_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    let mailer: Arc<dyn Mailer> = match &config.transport {
        MailTransport::Smtp(settings) => Arc::new(SmtpMailer::new(settings, config.timeout)?),
        MailTransport::SendGrid(settings) => {
            Arc::new(SendGridMailer::new(settings, config.timeout)?)
        }
        MailTransport::Log => Arc::new(LogMailer::new()),
    };

    info!(transport = %mailer.name(), "Mailer initialized");
    Ok(mailer)
}
