mod common;

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use common::{authed, test_app};

#[tokio::test]
async fn create_fills_server_assigned_fields() {
    let (app, _backend) = test_app();

    let (status, body) = authed(
        &app,
        "POST",
        "/organizations",
        Some(json!({ "name": "Acme U", "domain": "acme.edu" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Acme U");
    assert_eq!(body["domain"], "acme.edu");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["plan"], "free");

    let id = Uuid::parse_str(body["id"].as_str().unwrap()).unwrap();
    assert!(!id.is_nil());
    assert!(body["created_at"].as_str().is_some());
    assert!(body["updated_at"].as_str().is_some());
}

#[tokio::test]
async fn created_organization_round_trips() {
    let (app, _backend) = test_app();

    let (_, created) = authed(
        &app,
        "POST",
        "/organizations",
        Some(json!({
            "name": "Acme U",
            "domain": "acme.edu",
            "description": "A university",
            "primary_color": "#003366"
        })),
    )
    .await;

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = authed(&app, "GET", &format!("/organizations/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn listing_starts_empty_and_grows() {
    let (app, _backend) = test_app();

    let (status, body) = authed(&app, "GET", "/organizations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    authed(
        &app,
        "POST",
        "/organizations",
        Some(json!({ "name": "Acme U", "domain": "acme.edu" })),
    )
    .await;

    let (status, body) = authed(&app, "GET", "/organizations", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn update_acknowledges_and_persists() {
    let (app, _backend) = test_app();

    let (_, created) = authed(
        &app,
        "POST",
        "/organizations",
        Some(json!({ "name": "Acme U", "domain": "acme.edu" })),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = authed(
        &app,
        "PUT",
        &format!("/organizations/{id}"),
        Some(json!({ "name": "Acme University", "domain": "acme.edu", "status": "active" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "organization updated successfully");

    let (_, fetched) = authed(&app, "GET", &format!("/organizations/{id}"), None).await;
    assert_eq!(fetched["name"], "Acme University");
    assert_eq!(fetched["status"], "active");
}

#[tokio::test]
async fn update_of_missing_organization_fails_without_touching_backend() {
    let (app, backend) = test_app();

    let (status, body) = authed(
        &app,
        "PUT",
        &format!("/organizations/{}", Uuid::new_v4()),
        Some(json!({ "name": "Ghost", "domain": "ghost.edu" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("organization not found"));
    assert_eq!(backend.organizations.update_calls(), 0);
}

#[tokio::test]
async fn delete_then_fetch_yields_not_found() {
    let (app, _backend) = test_app();

    let (_, created) = authed(
        &app,
        "POST",
        "/organizations",
        Some(json!({ "name": "Acme U", "domain": "acme.edu" })),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();

    let (status, body) = authed(&app, "DELETE", &format!("/organizations/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "organization deleted successfully");

    let (status, body) = authed(&app, "GET", &format!("/organizations/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "organization not found" }));

    // A second delete now fails the existence pre-check.
    let (status, body) = authed(&app, "DELETE", &format!("/organizations/{id}"), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("organization not found"));
}

#[tokio::test]
async fn malformed_path_id_is_rejected_before_the_service() {
    let (app, backend) = test_app();

    for method in ["GET", "PUT", "DELETE"] {
        let body = (method == "PUT")
            .then(|| json!({ "name": "Acme U", "domain": "acme.edu" }));
        let (status, response) =
            authed(&app, method, "/organizations/not-a-uuid", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{method} should 400");
        assert_eq!(response, json!({ "error": "invalid organization ID" }));
    }

    assert_eq!(backend.organizations.update_calls(), 0);
    assert_eq!(backend.organizations.len(), 0);
}

#[tokio::test]
async fn malformed_body_is_rejected() {
    let (app, backend) = test_app();

    // `name` must be a string
    let (status, body) = authed(
        &app,
        "POST",
        "/organizations",
        Some(json!({ "name": 42, "domain": "acme.edu" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some());
    assert_eq!(backend.organizations.len(), 0);
}

#[tokio::test]
async fn point_lookup_masks_backend_faults() {
    let (app, backend) = test_app();
    backend.organizations.set_failing(true);

    let (status, body) = authed(
        &app,
        "GET",
        &format!("/organizations/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "internal error" }));
}

#[tokio::test]
async fn listing_surfaces_backend_faults_as_500() {
    let (app, backend) = test_app();
    backend.organizations.set_failing(true);

    let (status, body) = authed(&app, "GET", "/organizations", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("failed to list organization records"));
}
