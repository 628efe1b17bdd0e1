//! Direct SMTP submission.
//!
//! Opens a fresh session per message: connect, STARTTLS, AUTH PLAIN, envelope,
//! DATA, QUIT. Any step failing aborts the submission and drops the connection.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::{error, info, instrument};

use super::{MailError, Mailer, OutboundEmail};
use crate::config::SmtpSettings;

/// Reply codes meaning the relay refused our credentials.
const AUTH_FAILURE_CODES: [&str; 3] = ["530", "534", "535"];

/// Mailer that submits directly to an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    /// Envelope and header sender; the authenticated relay account.
    sender: Address,
    host: String,
    timeout: Duration,
}

impl SmtpMailer {
    /// Creates a new SMTP mailer. No connection is made until the first send.
    pub fn new(settings: &SmtpSettings, timeout: Duration) -> Result<Self, MailError> {
        let sender: Address = settings
            .username
            .parse()
            .map_err(|e| MailError::Address(format!("SMTP_USERNAME: {}", e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)
            .map_err(|e| MailError::Configuration(e.to_string()))?
            .port(settings.port)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.clone(),
            ))
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(timeout))
            .build();

        Ok(Self {
            transport,
            sender,
            host: settings.host.clone(),
            timeout,
        })
    }

    /// Renders the RFC 5322 message for `email`.
    pub fn build_message(&self, email: &OutboundEmail) -> Result<Message, MailError> {
        let from = Mailbox::new(Some(email.from_name.clone()), self.sender.clone());
        let reply_to: Mailbox = email
            .reply_to
            .parse()
            .map_err(|e| MailError::Address(format!("reply-to '{}': {}", email.reply_to, e)))?;
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| MailError::Address(format!("recipient '{}': {}", email.to, e)))?;

        Message::builder()
            .from(from)
            .reply_to(reply_to)
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text_body.clone(),
                email.html_body.clone(),
            ))
            .map_err(|e| MailError::Configuration(e.to_string()))
    }
}

fn classify(err: lettre::transport::smtp::Error) -> MailError {
    if err.is_timeout() {
        return MailError::Transport(format!("timed out: {}", err));
    }

    let code = err.status().map(|c| c.to_string());
    match code.as_deref() {
        Some(c) if AUTH_FAILURE_CODES.contains(&c) => MailError::Auth(err.to_string()),
        Some(_) if err.is_permanent() => MailError::Rejected(err.to_string()),
        _ => MailError::Transport(err.to_string()),
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, email), fields(mailer = "smtp", host = %self.host))]
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;

        info!(to = %email.to, "Submitting message to SMTP relay");

        match tokio::time::timeout(self.timeout, self.transport.send(message)).await {
            Ok(Ok(_)) => {
                info!(
                    to = %email.to,
                    reply_to = %email.reply_to,
                    "Email sent"
                );
                Ok(())
            }
            Ok(Err(e)) => {
                let err = classify(e);
                error!(error = %err, "SMTP submission failed");
                Err(err)
            }
            Err(_) => {
                error!(timeout = ?self.timeout, "SMTP submission timed out");
                Err(MailError::Timeout(self.timeout))
            }
        }
    }

    fn name(&self) -> &str {
        "smtp"
    }
}
