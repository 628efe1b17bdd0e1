//! Provider API submission via SendGrid's v3 `mail/send` endpoint.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use super::{MailError, Mailer, OutboundEmail};
use crate::config::SendGridSettings;

/// Mailer that submits through the SendGrid HTTP API.
pub struct SendGridMailer {
    client: reqwest::Client,
    api_key: String,
    from_address: String,
    endpoint: String,
    timeout: Duration,
}

impl SendGridMailer {
    /// Creates a new SendGrid mailer.
    pub fn new(settings: &SendGridSettings, timeout: Duration) -> Result<Self, MailError> {
        if settings.api_key.is_empty() {
            return Err(MailError::Configuration(
                "SendGrid API key cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MailError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone(),
            from_address: settings.from_address.clone(),
            endpoint: format!("{}/v3/mail/send", settings.base_url.trim_end_matches('/')),
            timeout,
        })
    }

    /// Creates the JSON payload for a message.
    fn create_payload<'a>(&'a self, email: &'a OutboundEmail) -> SendGridPayload<'a> {
        SendGridPayload {
            personalizations: vec![Personalization {
                to: vec![EmailAddress {
                    email: &email.to,
                    name: None,
                }],
            }],
            from: EmailAddress {
                email: &self.from_address,
                name: Some(&email.from_name),
            },
            reply_to: EmailAddress {
                email: &email.reply_to,
                name: None,
            },
            subject: &email.subject,
            content: vec![
                Content {
                    content_type: "text/plain",
                    value: &email.text_body,
                },
                Content {
                    content_type: "text/html",
                    value: &email.html_body,
                },
            ],
        }
    }
}

#[async_trait]
impl Mailer for SendGridMailer {
    #[instrument(skip(self, email), fields(mailer = "sendgrid"))]
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let payload = self.create_payload(email);
        debug!(endpoint = %self.endpoint, "Sending message to SendGrid");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MailError::Timeout(self.timeout)
                } else {
                    MailError::Transport(format!("HTTP request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status.is_success() {
            info!(to = %email.to, reply_to = %email.reply_to, "Email sent");
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response body".to_string());
        error!(status = %status, body = %body, "SendGrid rejected message");

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Err(MailError::Auth(format!("SendGrid returned {}", status)))
            }
            _ => Err(MailError::Rejected(format!(
                "SendGrid returned {}: {}",
                status, body
            ))),
        }
    }

    fn name(&self) -> &str {
        "sendgrid"
    }
}

#[derive(Debug, Serialize)]
struct SendGridPayload<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: EmailAddress<'a>,
    reply_to: EmailAddress<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<EmailAddress<'a>>,
}

#[derive(Debug, Serialize)]
struct EmailAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}
