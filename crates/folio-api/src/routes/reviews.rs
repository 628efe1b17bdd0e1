//! Review endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use folio_core::{secrets_match, NewReview, Review};
use tracing::{info, instrument, warn};

use crate::dto::ReviewRequest;
use crate::error::ApiError;
use crate::extract::{validate_request, JsonBody};
use crate::state::AppState;

pub const REVIEW_SUBMITTED: &str = "Review submitted successfully";

/// Creates review routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reviews", get(list_reviews))
        .route("/review", post(submit_review))
}

/// Lists all reviews in insertion order.
#[instrument(skip_all)]
async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, ApiError> {
    let reviews = state.reviews.list().await?;
    Ok(Json(reviews))
}

/// Stores a review when the shared form key matches.
#[instrument(skip_all)]
async fn submit_review(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ReviewRequest>,
) -> Result<(StatusCode, &'static str), ApiError> {
    if !secrets_match(&request.key, &state.forms.review_key) {
        warn!("Review submitted with invalid key");
        return Err(ApiError::Unauthorized("Invalid review key".to_string()));
    }

    validate_request(&request)?;

    let review = NewReview::new(request.company, request.name, request.review);
    state.reviews.insert(&review).await?;

    info!(company = %review.company, "Review stored");
    Ok((StatusCode::OK, REVIEW_SUBMITTED))
}
