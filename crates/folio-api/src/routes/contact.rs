//! Contact form endpoint.

use axum::{extract::State, http::StatusCode, routing::post, Router};
use folio_core::{secrets_match, ContactMessage, OutboundEmail};
use tracing::{error, info, instrument, warn};

use crate::dto::ContactRequest;
use crate::error::ApiError;
use crate::extract::{validate_request, JsonBody};
use crate::state::AppState;

pub const MESSAGE_SENT: &str = "Message sent successfully";

/// Creates contact routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact))
}

/// Relays a contact-form message to the administrative address.
///
/// The message is never stored; a failed dispatch is reported as 500 and leaves
/// nothing behind.
#[instrument(skip_all)]
async fn submit_contact(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ContactRequest>,
) -> Result<(StatusCode, &'static str), ApiError> {
    if let Some(expected) = &state.forms.contact_key {
        let provided = request.key.as_deref().unwrap_or_default();
        if !secrets_match(provided, expected) {
            warn!("Contact form submitted with invalid key");
            return Err(ApiError::Unauthorized("Invalid contact form key".to_string()));
        }
    }

    validate_request(&request)?;

    let recipient = state.forms.admin_email.as_deref().ok_or_else(|| {
        error!("ADMIN_EMAIL is not configured; cannot relay contact message");
        ApiError::NotConfigured("ADMIN_EMAIL".to_string())
    })?;

    let message = ContactMessage {
        name: request.name,
        email: request.email,
        message: request.message,
    };
    let email = OutboundEmail::contact(&message, state.from_name.as_ref(), recipient);

    state.mailer.send(&email).await?;

    info!(mailer = %state.mailer.name(), reply_to = %message.email, "Contact message relayed");
    Ok((StatusCode::OK, MESSAGE_SENT))
}
