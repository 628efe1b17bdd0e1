//! Bearer token check for protected routes.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use folio_core::parse_bearer;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects the request with 401 unless it carries a valid bearer token.
///
/// On success the verified [`folio_core::TokenClaims`] are inserted into the
/// request extensions.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = state.auth.as_ref().ok_or_else(|| {
        ApiError::Unauthorized("Token authentication is not configured".to_string())
    })?;

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    let token = parse_bearer(header).ok_or_else(|| {
        ApiError::Unauthorized("Authorization header must be 'Bearer <token>'".to_string())
    })?;

    let claims = auth.signer.verify(token).map_err(|e| {
        debug!(error = %e, "Bearer token rejected");
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
