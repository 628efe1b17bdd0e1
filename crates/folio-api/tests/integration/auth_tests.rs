//! Token login, verification and protected access.

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use folio_api::dto::{TokenResponse, VerifyResponse};
use folio_core::TokenSigner;
use serde_json::json;

use super::common::*;

async fn login_token(app: &SpyApp) -> String {
    let response = post_json(
        &app.router,
        "/api/login",
        json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let TokenResponse { token } = response.json();
    token
}

fn signer() -> TokenSigner {
    TokenSigner::new(JWT_SECRET, std::time::Duration::from_secs(3600)).unwrap()
}

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let app = spy_app();
    let token = login_token(&app).await;

    let claims = signer().verify(&token).unwrap();
    assert_eq!(claims.username, ADMIN_USERNAME);

    let response = with_authorization(
        &app.router,
        Method::POST,
        "/api/verify",
        &format!("Bearer {}", token),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let verified: VerifyResponse = response.json();
    assert!(verified.valid);
    assert_eq!(verified.username, ADMIN_USERNAME);
}

#[tokio::test]
async fn test_protected_accepts_any_method() {
    let app = spy_app();
    let token = login_token(&app).await;
    let authorization = format!("Bearer {}", token);

    for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::PATCH] {
        let response =
            with_authorization(&app.router, method.clone(), "/api/protected", &authorization).await;
        assert_eq!(response.status, StatusCode::OK, "{}", method);
        assert_eq!(response.text(), "Access granted to protected route!");
    }
}

#[tokio::test]
async fn test_bad_credentials_rejected() {
    let app = spy_app();

    for (username, password) in [
        (ADMIN_USERNAME, "wrong"),
        ("root", ADMIN_PASSWORD),
        ("", ""),
    ] {
        let response = post_json(
            &app.router,
            "/api/login",
            json!({ "username": username, "password": password }),
        )
        .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_malformed_login_is_bad_request() {
    let app = spy_app();

    let response = post_raw(&app.router, "/api/login", r#"{"username": "admin"}"#).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_token_expired_an_hour_ago_rejected() {
    let app = spy_app();
    let expired = signer()
        .issue_at(ADMIN_USERNAME, Utc::now() - Duration::hours(2))
        .unwrap();

    for (method, uri) in [
        (Method::GET, "/api/protected"),
        (Method::POST, "/api/verify"),
    ] {
        let response =
            with_authorization(&app.router, method, uri, &format!("Bearer {}", expired)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{}", uri);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "TOKEN_EXPIRED");
    }
}

#[tokio::test]
async fn test_token_without_bearer_prefix_rejected() {
    let app = spy_app();
    let token = login_token(&app).await;

    for authorization in [token.as_str(), "Bearer", "Bearer ", "Basic abc", "bearer x"] {
        let response =
            with_authorization(&app.router, Method::GET, "/api/protected", authorization).await;
        assert_eq!(
            response.status,
            StatusCode::UNAUTHORIZED,
            "authorization {:?}",
            authorization
        );
    }
}

#[tokio::test]
async fn test_token_signed_with_other_secret_rejected() {
    let app = spy_app();
    let forged = TokenSigner::new("someone-elses-secret", std::time::Duration::from_secs(3600))
        .unwrap()
        .issue(ADMIN_USERNAME)
        .unwrap();

    let response = with_authorization(
        &app.router,
        Method::GET,
        "/api/protected",
        &format!("Bearer {}", forged),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
