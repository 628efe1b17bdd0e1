//! Cross-origin headers.
//!
//! Every response, errors included, carries the allow-origin, allow-methods and
//! allow-headers set. `OPTIONS` requests are answered here with an empty 204 and
//! never reach a handler.

use axum::{
    extract::{Request, State},
    http::{
        header::{
            ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS,
            ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN, VARY,
        },
        HeaderMap, HeaderValue, Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
pub const ALLOWED_HEADERS: &str = "Content-Type, Authorization, X-Request-Id";

#[derive(Debug, Clone, Default)]
enum AllowedOrigins {
    #[default]
    Any,
    List(Vec<HeaderValue>),
}

/// Which origins may call the API.
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    origins: AllowedOrigins,
}

impl CorsPolicy {
    /// Builds a policy from configured origins. An empty list allows any origin.
    ///
    /// Origins that are not valid header values are skipped. If none survive,
    /// no origin is allowed.
    pub fn new(origins: &[String]) -> Self {
        if origins.is_empty() {
            return Self::default();
        }

        let values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!(origin = %origin, error = %e, "Invalid CORS origin, skipping");
                    None
                }
            })
            .collect();

        if values.is_empty() {
            warn!("No valid CORS origins configured, falling back to restrictive mode");
        } else {
            info!(origins = ?origins, "CORS configured with allowed origins");
        }

        Self {
            origins: AllowedOrigins::List(values),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        matches!(self.origins, AllowedOrigins::Any)
    }

    /// Writes the cross-origin headers for a request from `request_origin`.
    pub fn apply(&self, request_origin: Option<&HeaderValue>, headers: &mut HeaderMap) {
        match &self.origins {
            AllowedOrigins::Any => {
                headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
            }
            AllowedOrigins::List(allowed) => {
                if let Some(origin) = request_origin.filter(|o| allowed.contains(o)) {
                    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin.clone());
                    headers.insert(
                        ACCESS_CONTROL_ALLOW_CREDENTIALS,
                        HeaderValue::from_static("true"),
                    );
                }
                headers.append(VARY, HeaderValue::from_static("Origin"));
            }
        }

        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        );
    }
}

/// CORS middleware.
pub async fn cors(State(policy): State<Arc<CorsPolicy>>, request: Request, next: Next) -> Response {
    let origin = request.headers().get(ORIGIN).cloned();

    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    policy.apply(origin.as_ref(), response.headers_mut());
    response
}
