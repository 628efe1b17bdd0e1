//! # folio-api
//!
//! HTTP surface of the Folio portfolio backend.
//!
//! Exposes reviews, projects, the contact form and token login over a small
//! JSON API built on axum. Handlers receive every collaborator through
//! [`AppState`]; none of them read the environment.

pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::{ApiError, ErrorResponse};
pub use server::{ApiServer, ApiServerConfig};
pub use state::{AppState, AuthState};
