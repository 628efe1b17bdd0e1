//! Token login and protected routes.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{any, post},
    Extension, Json, Router,
};
use folio_core::TokenClaims;
use tracing::{info, instrument, warn};

use crate::dto::{LoginRequest, TokenResponse, VerifyResponse};
use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::middleware::require_bearer;
use crate::state::AppState;

pub const ACCESS_GRANTED: &str = "Access granted to protected route!";

/// Creates auth routes. `/verify` and `/protected` sit behind the bearer check.
pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/verify", post(verify))
        .route("/protected", any(protected))
        .route_layer(middleware::from_fn_with_state(state, require_bearer));

    Router::new().route("/login", post(login)).merge(protected)
}

/// Exchanges the configured credential pair for a signed token.
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let auth = state.auth.as_ref().ok_or_else(|| {
        ApiError::NotConfigured("JWT_SECRET, ADMIN_USERNAME, ADMIN_PASSWORD".to_string())
    })?;

    if !auth.credentials.verify(&request.username, &request.password) {
        warn!(username = %request.username, "Login failed");
        return Err(ApiError::InvalidCredentials);
    }

    let token = auth.signer.issue(&request.username)?;

    info!(username = %request.username, "Login succeeded");
    Ok(Json(TokenResponse { token }))
}

/// Confirms that the bearer token is valid.
async fn verify(Extension(claims): Extension<TokenClaims>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        expires_at: claims.expires_at(),
        username: claims.username,
    })
}

async fn protected() -> (StatusCode, &'static str) {
    (StatusCode::OK, ACCESS_GRANTED)
}
