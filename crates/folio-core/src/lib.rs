//! # folio-core
//!
//! Domain models, configuration, persistence and mail dispatch for Folio,
//! the backend behind a personal portfolio site.
//!
//! The HTTP surface lives in `folio-api`; everything here is transport-agnostic
//! and can be exercised without a running server.

pub mod auth;
pub mod config;
pub mod db;
pub mod mail;
pub mod models;

pub use auth::token::{TokenClaims, TokenError, TokenSigner};
pub use auth::{parse_bearer, secrets_match, AdminCredentials};
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, FormConfig, MailConfig, MailTransport,
    SendGridSettings, ServerConfig, SmtpSettings,
};
pub use db::{DbError, DbPool};
pub use mail::{create_mailer, MailError, Mailer, OutboundEmail};
pub use models::{ContactMessage, NewReview, Project, ProjectAction, Review};
