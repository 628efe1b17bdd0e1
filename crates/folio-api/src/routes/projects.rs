//! Project endpoints.

use axum::{extract::State, routing::get, Json, Router};
use folio_core::Project;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Creates project routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/projects", get(list_projects))
}

/// Lists projects with their derived action label.
#[instrument(skip_all)]
async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    let projects = state.projects.list().await?;
    Ok(Json(projects))
}
