//! Shared test helpers for the folio-api crate.
//!
//! Builds an [`AppState`] over in-memory mocks and keeps handles to the mocks so
//! tests can inspect what a request touched.

use folio_core::db::mocks::{MockProjectRepository, MockReviewRepository};
use folio_core::mail::MockMailer;
use folio_core::{AuthConfig, FormConfig};
use std::sync::Arc;
use std::time::Duration;

use crate::state::AppState;

pub const REVIEW_KEY: &str = "review-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse";

/// Mocks behind a test state.
pub struct TestContext {
    pub state: AppState,
    pub reviews: Arc<MockReviewRepository>,
    pub projects: Arc<MockProjectRepository>,
    pub mailer: MockMailer,
}

pub fn test_forms() -> FormConfig {
    FormConfig {
        review_key: REVIEW_KEY.to_string(),
        contact_key: None,
        admin_email: Some(ADMIN_EMAIL.to_string()),
    }
}

pub fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-jwt-secret".to_string(),
        username: ADMIN_USERNAME.to_string(),
        password: ADMIN_PASSWORD.to_string(),
        token_ttl: Duration::from_secs(3600),
    }
}

/// Creates a state with the given form settings and login enabled.
pub fn create_test_context_with_forms(forms: FormConfig) -> TestContext {
    let reviews = Arc::new(MockReviewRepository::new());
    let projects = Arc::new(MockProjectRepository::with_urls(&[
        ("Folio", "https://github.com/example/folio"),
        ("Shop", "https://shop.example.com"),
    ]));
    let mailer = MockMailer::new();

    let state = AppState::new(
        reviews.clone(),
        projects.clone(),
        Arc::new(mailer.clone()),
        forms,
    )
    .with_auth(&test_auth_config())
    .expect("valid auth config");

    TestContext {
        state,
        reviews,
        projects,
        mailer,
    }
}

/// Creates a state with default test form settings and login enabled.
pub fn create_test_context() -> TestContext {
    create_test_context_with_forms(test_forms())
}
