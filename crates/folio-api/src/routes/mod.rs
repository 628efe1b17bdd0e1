//! API routes.

pub mod auth;
pub mod contact;
pub mod health;
pub mod projects;
pub mod reviews;

use axum::{http::Uri, Router};

use crate::error::ApiError;
use crate::state::AppState;

/// Creates the main API router.
///
/// CORS is applied by `ApiServer::router` outside every other layer.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(state.clone()))
        .merge(health::routes())
        .fallback(not_found)
        .with_state(state)
}

/// API routes under /api prefix.
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(reviews::routes())
        .merge(projects::routes())
        .merge(contact::routes())
        .merge(auth::routes(state))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
