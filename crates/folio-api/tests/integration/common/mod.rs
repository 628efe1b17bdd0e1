//! Common test utilities for integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use folio_api::{ApiServer, ApiServerConfig, AppState};
use folio_core::db::mocks::{MockProjectRepository, MockReviewRepository};
use folio_core::db::{create_pool_with_options, run_migrations, PoolOptions};
use folio_core::mail::MockMailer;
use folio_core::{AuthConfig, DbPool, FormConfig};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

pub const REVIEW_KEY: &str = "review-secret";
pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "correct horse";
pub const JWT_SECRET: &str = "integration-jwt-secret";

/// Creates an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> DbPool {
    let db_url = format!(
        "sqlite:file:integration_test_{}?mode=memory&cache=shared",
        Uuid::new_v4()
    );

    let pool = create_pool_with_options(
        &db_url,
        PoolOptions {
            max_connections: 1,
            ..PoolOptions::default()
        },
    )
    .await
    .expect("Failed to create SQLite pool");

    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

/// Inserts project rows directly; projects are seeded out-of-band.
pub async fn seed_projects(pool: &DbPool, projects: &[(&str, &str, &str)]) {
    let DbPool::Sqlite(sqlite) = pool else {
        panic!("integration tests use SQLite");
    };
    for (title, description, url) in projects {
        sqlx::query("INSERT INTO projects (title, description, url) VALUES (?, ?, ?)")
            .bind(*title)
            .bind(*description)
            .bind(*url)
            .execute(sqlite)
            .await
            .expect("Failed to seed project");
    }
}

pub fn test_forms() -> FormConfig {
    FormConfig {
        review_key: REVIEW_KEY.to_string(),
        contact_key: None,
        admin_email: Some(ADMIN_EMAIL.to_string()),
    }
}

pub fn test_auth() -> AuthConfig {
    AuthConfig {
        jwt_secret: JWT_SECRET.to_string(),
        username: ADMIN_USERNAME.to_string(),
        password: ADMIN_PASSWORD.to_string(),
        token_ttl: Duration::from_secs(3600),
    }
}

/// Router over a real SQLite database plus a recording mailer.
pub struct DbApp {
    pub router: Router,
    pub pool: DbPool,
    pub mailer: MockMailer,
}

pub async fn db_app() -> DbApp {
    db_app_with_forms(test_forms()).await
}

pub async fn db_app_with_forms(forms: FormConfig) -> DbApp {
    let pool = setup_test_db().await;
    let mailer = MockMailer::new();

    let state = state_over_pool(pool.clone(), mailer.clone(), forms);
    let router = ApiServer::with_state(state).router();

    DbApp {
        router,
        pool,
        mailer,
    }
}

fn state_over_pool(pool: DbPool, mailer: MockMailer, forms: FormConfig) -> AppState {
    use folio_core::db::{create_project_repository, create_review_repository};

    AppState::new(
        Arc::from(create_review_repository(&pool)),
        Arc::from(create_project_repository(&pool)),
        Arc::new(mailer),
        forms,
    )
    .with_auth(&test_auth())
    .expect("valid auth config")
    .with_db(pool)
}

/// Router over counting mocks, for asserting what a request did not touch.
pub struct SpyApp {
    pub router: Router,
    pub reviews: Arc<MockReviewRepository>,
    pub projects: Arc<MockProjectRepository>,
    pub mailer: MockMailer,
}

impl SpyApp {
    /// Calls made to any collaborator.
    pub async fn total_calls(&self) -> usize {
        self.reviews.total_calls() + self.projects.list_calls() + self.mailer.sent_count().await
    }
}

pub fn spy_app() -> SpyApp {
    spy_app_with_config(ApiServerConfig::default())
}

pub fn spy_app_with_config(config: ApiServerConfig) -> SpyApp {
    let reviews = Arc::new(MockReviewRepository::new());
    let projects = Arc::new(MockProjectRepository::with_urls(&[(
        "Folio",
        "https://github.com/example/folio",
    )]));
    let mailer = MockMailer::new();

    let state = AppState::new(
        reviews.clone(),
        projects.clone(),
        Arc::new(mailer.clone()),
        test_forms(),
    )
    .with_auth(&test_auth())
    .expect("valid auth config");

    SpyApp {
        router: ApiServer::new(state, config).router(),
        reviews,
        projects,
        mailer,
    }
}

/// A finished response, body collected.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse response body")
    }
}

/// Sends a request through the router.
pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    send(
        router,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn post_json(router: &Router, uri: &str, body: serde_json::Value) -> TestResponse {
    post_raw(router, uri, body.to_string()).await
}

pub async fn post_raw(router: &Router, uri: &str, body: impl Into<String>) -> TestResponse {
    send(
        router,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.into()))
            .unwrap(),
    )
    .await
}

/// Sends a request with an `Authorization` header.
pub async fn with_authorization(
    router: &Router,
    method: Method,
    uri: &str,
    authorization: &str,
) -> TestResponse {
    send(
        router,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, authorization)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}
