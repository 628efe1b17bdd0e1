//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::{DbError, MailError, TokenError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::error;

/// API error type.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (undecodable body, invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Validation error with field-level details.
    #[error("Validation failed")]
    ValidationError(ValidationErrorDetails),

    /// Request body larger than the configured limit.
    #[error("Request body too large")]
    PayloadTooLarge,

    /// Missing or wrong shared secret, or a missing/invalid bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid login credentials.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Bearer token past its expiry.
    #[error("Token expired")]
    TokenExpired,

    /// A setting needed by this endpoint is absent.
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Mail dispatch failed.
    #[error("Mail error: {0}")]
    Mail(String),
}

/// Details for field-level validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetails {
    /// Overall validation error message.
    pub message: String,
    /// Field-specific errors.
    pub fields: HashMap<String, Vec<FieldError>>,
}

/// A single field validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Error code (e.g., "length", "email").
    pub code: String,
    pub message: String,
}

impl ValidationErrorDetails {
    /// Creates a validation error from multiple field errors.
    pub fn from_fields(errors: HashMap<String, Vec<FieldError>>) -> Self {
        let message = match errors.len() {
            1 => {
                let field = errors.keys().next().map(String::as_str).unwrap_or_default();
                format!("Validation failed for field '{}'", field)
            }
            n => format!("Validation failed for {} fields", n),
        };
        Self {
            message,
            fields: errors,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional error details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Mail(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::TokenExpired => "TOKEN_EXPIRED",
            ApiError::NotConfigured(_) => "NOT_CONFIGURED",
            ApiError::Internal(_) => "INTERNAL_ERROR",
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Mail(_) => "MAIL_ERROR",
        }
    }

    /// Client-facing message. Server-side failures are summarised; the detail
    /// only goes to the log.
    fn public_message(&self) -> String {
        match self {
            ApiError::NotConfigured(_) => "Service is not configured for this request".to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
            ApiError::Database(_) => "Failed to access storage".to_string(),
            ApiError::Mail(_) => "Failed to send message".to_string(),
            ApiError::ValidationError(details) => details.message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "Request failed");
        }

        let details = match &self {
            ApiError::ValidationError(details) => serde_json::to_value(&details.fields).ok(),
            _ => None,
        };

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.public_message(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<MailError> for ApiError {
    fn from(err: MailError) -> Self {
        ApiError::Mail(err.to_string())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => ApiError::TokenExpired,
            TokenError::Signing(msg) => ApiError::Internal(format!("token signing: {}", msg)),
            other => ApiError::Unauthorized(other.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let fields = err
            .field_errors()
            .into_iter()
            .map(|(field_name, field_errors)| {
                let errors = field_errors
                    .iter()
                    .map(|e| {
                        let code = e.code.to_string();
                        let message = e.message.clone().map(|m| m.to_string()).unwrap_or_else(
                            || format!("Field '{}' failed validation: {}", field_name, code),
                        );
                        FieldError { code, message }
                    })
                    .collect();
                (field_name.to_string(), errors)
            })
            .collect();

        ApiError::ValidationError(ValidationErrorDetails::from_fields(fields))
    }
}
