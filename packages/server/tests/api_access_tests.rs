//! Permission and request-shape errors for signed-in callers.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{create_test_admin, create_test_user};
use company_hub::domains::auth::UserRole;

fn json_request(method: Method, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn collaborator_cannot_create_sites() {
    let harness = harness_or_skip!();
    let user = create_test_user(&harness.db_pool, UserRole::Collaborator)
        .await
        .unwrap();
    let token = harness.token_for(&user).await;

    let response = harness
        .app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/sites",
            &token,
            json!({ "name": "Acme", "primary_url": "https://acme.example" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "forbidden");
}

#[tokio::test]
async fn forbidden_wins_over_an_invalid_body() {
    let harness = harness_or_skip!();
    let user = create_test_user(&harness.db_pool, UserRole::Collaborator)
        .await
        .unwrap();
    let token = harness.token_for(&user).await;

    let response = harness
        .app()
        .oneshot(json_request(Method::POST, "/api/v1/sites", &token, json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn blank_site_name_is_rejected_before_insert() {
    let harness = harness_or_skip!();
    let admin = create_test_admin(&harness.db_pool).await.unwrap();
    let token = harness.token_for(&admin).await;

    let response = harness
        .app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/sites",
            &token,
            json!({ "name": "  <b></b> ", "primary_url": "https://blank-name.example" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "missing_required_fields");
    assert!(body["message"].as_str().unwrap().contains("name is required"));

    let inserted: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sites WHERE primary_url = $1")
        .bind("https://blank-name.example")
        .fetch_one(&harness.db_pool)
        .await
        .unwrap();
    assert_eq!(inserted, 0);
}

#[tokio::test]
async fn malformed_path_id_is_a_bad_request() {
    let harness = harness_or_skip!();
    let admin = create_test_admin(&harness.db_pool).await.unwrap();
    let token = harness.token_for(&admin).await;

    let response = harness
        .app()
        .oneshot(json_request(Method::GET, "/api/v1/sites/not-a-uuid", &token, Value::Null))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "invalid_request");
}

#[tokio::test]
async fn unknown_integration_type_is_rejected() {
    let harness = harness_or_skip!();
    let admin = create_test_admin(&harness.db_pool).await.unwrap();
    let token = harness.token_for(&admin).await;

    let response = harness
        .app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/integrations/carrier-pigeon",
            &token,
            json!({ "config": {} }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
