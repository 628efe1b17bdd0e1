//! Static routing table behaviour.

use axum::http::{Method, StatusCode};
use axum::{body::Body, http::Request};

use super::common::*;

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = spy_app();

    let response = get(&app.router, "/api/unknown").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");

    let response = get(&app.router, "/").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_wrong_method_on_known_path() {
    let app = spy_app();

    let cases = [
        (Method::POST, "/api/reviews"),
        (Method::GET, "/api/review"),
        (Method::POST, "/api/projects"),
        (Method::GET, "/api/contact"),
        (Method::GET, "/api/login"),
        (Method::DELETE, "/api/reviews"),
    ];

    for (method, uri) in cases {
        let response = send(
            &app.router,
            Request::builder()
                .method(method.clone())
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(
            response.status,
            StatusCode::METHOD_NOT_ALLOWED,
            "{} {}",
            method,
            uri
        );
    }

    assert_eq!(app.total_calls().await, 0);
}

#[tokio::test]
async fn test_health_reports_database() {
    let app = db_app().await;

    let response = get(&app.router, "/health").await;
    assert_eq!(response.status, StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["backend"], "sqlite");
    assert_eq!(body["database"]["connected"], true);
}

#[tokio::test]
async fn test_health_unavailable_after_pool_closed() {
    let app = db_app().await;
    app.pool.close().await;

    let response = get(&app.router, "/health").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}
