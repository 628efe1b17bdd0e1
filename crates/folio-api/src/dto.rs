//! Request and response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/review`.
///
/// `key` defaults to empty so a missing secret is an authorization failure
/// rather than a decode failure.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(length(min = 1, message = "company is required"))]
    pub company: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "review is required"))]
    pub review: String,
    #[serde(default)]
    pub key: String,
}

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
    #[serde(default)]
    pub key: Option<String>,
}

/// Body of `POST /api/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response of `POST /api/verify`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub valid: bool,
    pub username: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseHealth>,
}

/// Database section of the health response.
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub backend: String,
    pub connected: bool,
    pub pool_size: u32,
    pub idle_connections: usize,
}
