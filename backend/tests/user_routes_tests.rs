//! HTTP behaviour of the user endpoints, driven through the full router

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use users_api::config::Config;
use users_api::routes;
use users_api::state::AppState;
use users_api::store::{MemoryUserStore, UserStore};

fn test_config(extra: &[(&str, &str)]) -> Config {
    let mut vars = vec![("DATABASE_URL", "postgresql://localhost/rocketship_test")];
    vars.extend_from_slice(extra);
    Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .expect("test config")
}

fn setup() -> (Router, MemoryUserStore) {
    let store = MemoryUserStore::new();
    let state = AppState::from_store(Arc::new(store.clone()));
    (routes::app(state, &test_config(&[])), store)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_create_then_duplicate_conflicts() {
    let (app, _) = setup();
    let payload = json!({"name": "Ann", "email": "ann@x.com"});

    let response = send(&app, json_request(Method::POST, "/users", payload.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_text(response).await,
        r#"{"id":1,"name":"Ann","email":"ann@x.com"}"#
    );

    let response = send(&app, json_request(Method::POST, "/users", payload)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_text(response).await,
        "User with this email already exists"
    );
}

#[tokio::test]
async fn test_get_unknown_user_is_404() {
    let (app, _) = setup();

    let response = send(&app, empty_request(Method::GET, "/users/999")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "User not found");
}

#[tokio::test]
async fn test_delete_unknown_user_is_204() {
    let (app, _) = setup();

    let response = send(&app, empty_request(Method::DELETE, "/users/999")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_list_and_get_existing_user() {
    let (app, _) = setup();
    send(
        &app,
        json_request(Method::POST, "/users", json!({"name": "Ann", "email": "ann@x.com"})),
    )
    .await;
    send(
        &app,
        json_request(Method::POST, "/users", json!({"name": "Bob", "email": "bob@x.com"})),
    )
    .await;

    let response = send(&app, empty_request(Method::GET, "/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([
            {"id": 1, "name": "Ann", "email": "ann@x.com"},
            {"id": 2, "name": "Bob", "email": "bob@x.com"}
        ])
    );

    let response = send(&app, empty_request(Method::GET, "/users/2")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": 2, "name": "Bob", "email": "bob@x.com"})
    );
}

#[tokio::test]
async fn test_list_empty_is_empty_array() {
    let (app, _) = setup();

    let response = send(&app, empty_request(Method::GET, "/users")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_update_existing_and_missing_user() {
    let (app, store) = setup();
    send(
        &app,
        json_request(Method::POST, "/users", json!({"name": "Ann", "email": "ann@x.com"})),
    )
    .await;

    let changed = json!({"id": 1, "name": "Anna", "email": "anna@x.com"});
    let response = send(&app, json_request(Method::PUT, "/users", changed.clone())).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, changed);
    assert_eq!(
        store.fetch_by_id(1).await.unwrap().map(|u| u.name),
        Some("Anna".to_string())
    );

    let ghost = json!({"id": 999, "name": "Ghost", "email": "ghost@x.com"});
    let response = send(&app, json_request(Method::PUT, "/users", ghost)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "User not found");
}

#[tokio::test]
async fn test_delete_existing_user_removes_it() {
    let (app, _) = setup();
    send(
        &app,
        json_request(Method::POST, "/users", json!({"name": "Ann", "email": "ann@x.com"})),
    )
    .await;

    let response = send(&app, empty_request(Method::DELETE, "/users/1")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, empty_request(Method::GET, "/users/1")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies_never_reach_the_store() {
    let (app, store) = setup();

    // Missing email
    let response = send(
        &app,
        json_request(Method::POST, "/users", json!({"name": "Ann"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!body_text(response).await.is_empty());

    // Mistyped id
    let response = send(
        &app,
        json_request(
            Method::PUT,
            "/users",
            json!({"id": "one", "name": "Ann", "email": "ann@x.com"}),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Not JSON at all
    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("name=Ann"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(store.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let (app, _) = setup();

    let response = send(&app, empty_request(Method::GET, "/users/abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, empty_request(Method::DELETE, "/users/abc")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_store_failure_is_500_without_details() {
    let (app, store) = setup();
    store.set_offline(true);

    let response = send(&app, empty_request(Method::GET, "/users")).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Internal server error");
}

#[tokio::test]
async fn test_health_reflects_store_state() {
    let (app, store) = setup();

    let response = send(&app, empty_request(Method::GET, "/health")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    store.set_offline(true);
    let response = send(&app, empty_request(Method::GET, "/health")).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "unhealthy");
}

#[tokio::test]
async fn test_root_banner() {
    let (app, _) = setup();

    let response = send(&app, empty_request(Method::GET, "/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "Users API Server");
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let (app, _) = setup();

    let response = send(&app, empty_request(Method::GET, "/users")).await;
    let headers = response.headers();

    assert_eq!(headers.get(header::X_CONTENT_TYPE_OPTIONS).unwrap(), "nosniff");
    assert_eq!(headers.get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    assert!(headers.get("x-request-id").is_some());
    assert!(headers.get(header::STRICT_TRANSPORT_SECURITY).is_none());
}

#[tokio::test]
async fn test_hsts_only_in_production() {
    let store = MemoryUserStore::new();
    let state = AppState::from_store(Arc::new(store));
    let app = routes::app(state, &test_config(&[("ENVIRONMENT", "production")]));

    let response = send(&app, empty_request(Method::GET, "/")).await;
    assert!(response
        .headers()
        .get(header::STRICT_TRANSPORT_SECURITY)
        .is_some());
}
