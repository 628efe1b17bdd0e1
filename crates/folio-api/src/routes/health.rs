//! Health check endpoint.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::time::Instant;

use crate::dto::{DatabaseHealth, HealthResponse};
use crate::state::AppState;

/// Start time for uptime calculation.
static START_TIME: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

/// Initialize the start time.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Reports liveness and, when a pool is attached, database reachability.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let uptime_seconds = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    let database = match &state.db {
        Some(pool) => Some(DatabaseHealth {
            backend: pool.db_type().to_string(),
            connected: pool.is_healthy().await,
            pool_size: pool.pool_size(),
            idle_connections: pool.idle_connections(),
        }),
        None => None,
    };

    let healthy = database.as_ref().map_or(true, |db| db.connected);
    let (status, http_status) = if healthy {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds,
            database,
        }),
    )
}
