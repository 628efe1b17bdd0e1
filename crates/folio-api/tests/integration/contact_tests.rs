//! Contact form relay.

use axum::http::StatusCode;
use serde_json::json;

use super::common::*;

fn ada() -> serde_json::Value {
    json!({ "name": "Ada", "email": "ada@example.com", "message": "hello" })
}

#[tokio::test]
async fn test_contact_message_relayed_to_admin() {
    let app = db_app().await;

    let response = post_json(&app.router, "/api/contact", ada()).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "Message sent successfully");

    let sent = app.mailer.sent().await;
    assert_eq!(sent.len(), 1);
    let email = &sent[0];
    assert_eq!(email.reply_to, "ada@example.com");
    assert_eq!(email.to, ADMIN_EMAIL);
    assert_eq!(email.subject, "New Contact Form Submission");
    assert_eq!(email.from_name, "Portfolio Contact Form");
    assert!(email.text_body.contains("hello"));
    assert!(email.html_body.contains("hello"));
}

#[tokio::test]
async fn test_contact_html_body_escaped() {
    let app = db_app().await;

    let response = post_json(
        &app.router,
        "/api/contact",
        json!({
            "name": "<script>alert(1)</script>",
            "email": "ada@example.com",
            "message": "a < b & c",
        }),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let sent = app.mailer.sent().await;
    assert!(!sent[0].html_body.contains("<script>"));
    assert!(sent[0].html_body.contains("a &lt; b &amp; c"));
}

#[tokio::test]
async fn test_missing_recipient_is_internal_error() {
    let mut forms = test_forms();
    forms.admin_email = None;
    let app = db_app_with_forms(forms).await;

    let response = post_json(&app.router, "/api/contact", ada()).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.mailer.sent_count().await, 0);
}

#[tokio::test]
async fn test_dispatch_failure_is_internal_error() {
    let app = db_app().await;
    app.mailer.set_failing(true);

    let response = post_json(&app.router, "/api/contact", ada()).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "MAIL_ERROR");
    assert_eq!(body["message"], "Failed to send message");
}

#[tokio::test]
async fn test_malformed_contact_json_leaves_mailer_untouched() {
    let app = spy_app();

    for body in [r#"{"name": "Ada""#, r#"{"name": "Ada"}"#, "null"] {
        let response = post_raw(&app.router, "/api/contact", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body {:?}", body);
    }

    assert_eq!(app.mailer.sent_count().await, 0);
}

#[tokio::test]
async fn test_contact_key_required_when_configured() {
    let mut forms = test_forms();
    forms.contact_key = Some("contact-secret".to_string());
    let app = db_app_with_forms(forms).await;

    let mut wrong = ada();
    wrong["key"] = json!("guess");
    let response = post_json(&app.router, "/api/contact", wrong).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.mailer.sent_count().await, 0);

    let mut right = ada();
    right["key"] = json!("contact-secret");
    let response = post_json(&app.router, "/api/contact", right).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.mailer.sent_count().await, 1);
}
