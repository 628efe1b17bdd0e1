//! Project listing against a real database.

use axum::http::StatusCode;
use folio_core::{Project, ProjectAction};

use super::common::*;

#[tokio::test]
async fn test_label_derived_per_row() {
    let app = db_app().await;
    seed_projects(
        &app.pool,
        &[
            ("Folio", "This site", "https://github.com/example/folio"),
            ("Shop", "A storefront", "https://shop.example.com"),
            ("Mirror", "Gist", "https://gist.github.com/example/1"),
        ],
    )
    .await;

    let response = get(&app.router, "/api/projects").await;
    assert_eq!(response.status, StatusCode::OK);

    let projects: Vec<Project> = response.json();
    assert_eq!(projects.len(), 3);
    for project in &projects {
        assert_eq!(project.action_label, ProjectAction::from_url(&project.url));
    }
    assert_eq!(projects[0].action_label, ProjectAction::ShowCode);
    assert_eq!(projects[1].action_label, ProjectAction::ShowWebsite);
    assert_eq!(projects[2].action_label, ProjectAction::ShowCode);
}

#[tokio::test]
async fn test_projects_wire_format() {
    let app = db_app().await;
    seed_projects(&app.pool, &[("Shop", "A storefront", "https://shop.example.com")]).await;

    let body: serde_json::Value = get(&app.router, "/api/projects").await.json();
    let project = &body[0];

    assert!(project["id"].is_i64());
    assert_eq!(project["title"], "Shop");
    assert_eq!(project["description"], "A storefront");
    assert_eq!(project["url"], "https://shop.example.com");
    assert_eq!(project["actionLabel"], "Show Website");
}

#[tokio::test]
async fn test_empty_projects_table_returns_empty_array() {
    let app = db_app().await;

    let response = get(&app.router, "/api/projects").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "[]");
}

#[tokio::test]
async fn test_projects_storage_failure() {
    let app = spy_app();
    app.projects.set_failing(true);

    let response = get(&app.router, "/api/projects").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}
