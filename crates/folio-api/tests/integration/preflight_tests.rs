//! Preflight short-circuiting and cross-origin headers.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};

use folio_api::ApiServerConfig;

use super::common::*;

const ROUTES: [&str; 8] = [
    "/api/reviews",
    "/api/review",
    "/api/projects",
    "/api/contact",
    "/api/login",
    "/api/verify",
    "/api/protected",
    "/health",
];

fn preflight(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_options_short_circuits_every_route() {
    let app = spy_app();

    for uri in ROUTES {
        let response = send(&app.router, preflight(uri)).await;

        assert!(response.status.is_success(), "{} -> {}", uri, response.status);
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(response.body.is_empty(), "{} returned a body", uri);
        assert_eq!(response.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(response
            .headers
            .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
        assert!(response
            .headers
            .contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
    }

    assert_eq!(app.total_calls().await, 0);
}

#[tokio::test]
async fn test_protected_preflight_needs_no_token() {
    let app = spy_app();

    let response = send(&app.router, preflight("/api/protected")).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_cors_headers_on_errors() {
    let app = spy_app();

    let unauthorized = get(&app.router, "/api/protected").await;
    assert_eq!(unauthorized.status, StatusCode::UNAUTHORIZED);
    assert!(unauthorized
        .headers
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

    let not_found = get(&app.router, "/api/nope").await;
    assert_eq!(not_found.status, StatusCode::NOT_FOUND);
    assert!(not_found
        .headers
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));

    let bad_request = post_raw(&app.router, "/api/review", "{").await;
    assert_eq!(bad_request.status, StatusCode::BAD_REQUEST);
    assert!(bad_request
        .headers
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));

    let small = spy_app_with_config(ApiServerConfig {
        body_limit: 16,
        ..ApiServerConfig::default()
    });
    let body = serde_json::json!({
        "company": "Acme",
        "name": "Ada",
        "review": "a review that is clearly longer than sixteen bytes",
        "key": REVIEW_KEY,
    })
    .to_string();
    let too_large = send(
        &small.router,
        Request::builder()
            .method(Method::POST)
            .uri("/api/review")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .unwrap(),
    )
    .await;
    assert_eq!(too_large.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(too_large.headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(too_large
        .headers
        .contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
    assert_eq!(small.reviews.insert_calls(), 0);
}
