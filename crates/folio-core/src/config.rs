//! Application configuration.
//!
//! All settings are resolved once at startup from environment variables and then
//! passed into components explicitly. Nothing downstream reads the environment.

use std::time::Duration;
use thiserror::Error;

const REDACTED: &str = "***REDACTED***";

/// Errors raised while resolving configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    /// A variable is set but cannot be used.
    #[error("Invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

/// HTTP server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Upper bound on a single request.
    pub request_timeout: Duration,
    /// Maximum accepted request body size in bytes.
    pub body_limit: usize,
    /// Origins allowed to call the API. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(30),
            body_limit: 64 * 1024,
            cors_allowed_origins: Vec::new(),
        }
    }
}

/// Database settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `sqlite:` or `postgres://` connection URL.
    pub url: String,
    /// Maximum pool size.
    pub max_connections: u32,
    /// Maximum wait for a pooled connection.
    pub acquire_timeout: Duration,
}

/// SMTP relay settings.
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Transactional-email provider settings.
#[derive(Debug, Clone)]
pub struct SendGridSettings {
    pub api_key: String,
    /// Verified sender address on the provider account.
    pub from_address: String,
    /// API base URL, overridable for testing.
    pub base_url: String,
}

/// Mail transport selected by `MAIL_TRANSPORT`.
#[derive(Debug, Clone)]
pub enum MailTransport {
    Smtp(SmtpSettings),
    SendGrid(SendGridSettings),
    /// Log messages instead of sending them.
    Log,
}

impl MailTransport {
    /// Short name of the transport.
    pub fn name(&self) -> &'static str {
        match self {
            MailTransport::Smtp(_) => "smtp",
            MailTransport::SendGrid(_) => "sendgrid",
            MailTransport::Log => "log",
        }
    }
}

/// Mail dispatch settings.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub transport: MailTransport,
    /// Display name of the sending identity.
    pub from_name: String,
    /// Bound on a single submission.
    pub timeout: Duration,
}

/// Settings for the public forms.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Shared secret required to submit a review.
    pub review_key: String,
    /// Shared secret for the contact form. `None` leaves the form open.
    pub contact_key: Option<String>,
    /// Recipient of contact-form messages.
    pub admin_email: Option<String>,
}

/// Settings for token-based login.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub username: String,
    pub password: String,
    pub token_ttl: Duration,
}

/// Complete application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub mail: MailConfig,
    pub forms: FormConfig,
    /// `None` when login is not configured.
    pub auth: Option<AuthConfig>,
}

impl AppConfig {
    /// Resolves configuration from the process environment.
    ///
    /// Empty variables are treated as unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration using an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup: &lookup };

        let defaults = ServerConfig::default();
        let server = ServerConfig {
            host: env.get("FOLIO_HOST").unwrap_or(defaults.host),
            port: env.parse_or("FOLIO_PORT", defaults.port)?,
            request_timeout: Duration::from_secs(env.parse_or("REQUEST_TIMEOUT_SECS", 30)?),
            body_limit: env.parse_or("REQUEST_BODY_LIMIT", defaults.body_limit)?,
            cors_allowed_origins: env
                .get("CORS_ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        };

        let database = DatabaseConfig {
            url: database_url(&env)?,
            max_connections: env.parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            acquire_timeout: Duration::from_secs(env.parse_or("DATABASE_ACQUIRE_TIMEOUT_SECS", 5)?),
        };

        let transport = match env
            .get("MAIL_TRANSPORT")
            .unwrap_or_else(|| "smtp".to_string())
            .to_lowercase()
            .as_str()
        {
            "smtp" => MailTransport::Smtp(SmtpSettings {
                host: env.require("SMTP_HOST")?,
                port: env.parse_or("SMTP_PORT", 587)?,
                username: env.require("SMTP_USERNAME")?,
                password: env.require("SMTP_PASSWORD")?,
            }),
            "sendgrid" => MailTransport::SendGrid(SendGridSettings {
                api_key: env.require("SENDGRID_API_KEY")?,
                from_address: env.require("MAIL_FROM_ADDRESS")?,
                base_url: env
                    .get("SENDGRID_BASE_URL")
                    .unwrap_or_else(|| "https://api.sendgrid.com".to_string()),
            }),
            "log" => MailTransport::Log,
            other => {
                return Err(ConfigError::Invalid {
                    key: "MAIL_TRANSPORT".to_string(),
                    message: format!("expected smtp, sendgrid or log, got '{}'", other),
                })
            }
        };

        let mail = MailConfig {
            transport,
            from_name: env
                .get("MAIL_FROM_NAME")
                .unwrap_or_else(|| "Portfolio Contact Form".to_string()),
            timeout: Duration::from_secs(env.parse_or("MAIL_TIMEOUT_SECS", 10)?),
        };

        let forms = FormConfig {
            review_key: env.require("REVIEW_FORM_KEY")?,
            contact_key: env.get("CONTACT_FORM_KEY"),
            admin_email: env.get("ADMIN_EMAIL"),
        };

        let auth = match (
            env.get("JWT_SECRET"),
            env.get("ADMIN_USERNAME"),
            env.get("ADMIN_PASSWORD"),
        ) {
            (Some(jwt_secret), Some(username), Some(password)) => Some(AuthConfig {
                jwt_secret,
                username,
                password,
                token_ttl: Duration::from_secs(env.parse_or("TOKEN_TTL_SECS", 3600)?),
            }),
            (None, None, None) => None,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "JWT_SECRET".to_string(),
                    message: "JWT_SECRET, ADMIN_USERNAME and ADMIN_PASSWORD must be set together"
                        .to_string(),
                })
            }
        };

        Ok(Self {
            server,
            database,
            mail,
            forms,
            auth,
        })
    }

    /// Creates a copy with secrets redacted.
    pub fn redact_secrets(&self) -> Self {
        let mut config = self.clone();

        config.database.url = redact_url_password(&config.database.url);

        match &mut config.mail.transport {
            MailTransport::Smtp(smtp) => smtp.password = REDACTED.to_string(),
            MailTransport::SendGrid(sendgrid) => sendgrid.api_key = REDACTED.to_string(),
            MailTransport::Log => {}
        }

        config.forms.review_key = REDACTED.to_string();
        if config.forms.contact_key.is_some() {
            config.forms.contact_key = Some(REDACTED.to_string());
        }

        if let Some(auth) = &mut config.auth {
            auth.jwt_secret = REDACTED.to_string();
            auth.password = REDACTED.to_string();
        }

        config
    }
}

struct Env<'a, F: Fn(&str) -> Option<String>> {
    lookup: &'a F,
}

impl<F: Fn(&str) -> Option<String>> Env<'_, F> {
    fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))
    }

    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key: key.to_string(),
                message: e.to_string(),
            }),
            None => Ok(default),
        }
    }
}

/// Uses `DATABASE_URL` when present, otherwise assembles a PostgreSQL URL from
/// the individual `DB_*` variables.
fn database_url<F: Fn(&str) -> Option<String>>(env: &Env<'_, F>) -> Result<String, ConfigError> {
    if let Some(url) = env.get("DATABASE_URL") {
        return Ok(url);
    }

    let user = env.require("DB_USER")?;
    let password = env.get("DB_PASSWORD").unwrap_or_default();
    let host = env.require("DB_HOST")?;
    let port: u16 = env.parse_or("DB_PORT", 5432)?;
    let name = env.require("DB_NAME")?;

    Ok(format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, name
    ))
}

fn redact_url_password(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.split_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{}://{}:{}@{}", scheme, user, REDACTED, host),
        None => url.to_string(),
    }
}
