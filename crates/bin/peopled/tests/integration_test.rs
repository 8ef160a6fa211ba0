//! End-to-end tests for the full peopled stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real
//! repository, real service, real axum router) and exercises the HTTP layer
//! via `tower::ServiceExt::oneshot`. No TCP port is bound.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use http_body_util::BodyExt;
use people_adapter_http_axum::router::{self, WebConfig};
use people_adapter_http_axum::state::{AppInfo, AppState};
use people_adapter_storage_sqlite_sqlx::{Config, SqlitePersonRepository};
use people_app::services::person_service::PersonService;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> Router {
    let db = Config::in_memory()
        .build()
        .await
        .expect("in-memory database should initialise");

    let repo = SqlitePersonRepository::new(db.pool().clone());
    let info = AppInfo {
        version: "0.0.0-test".to_string(),
        environment: "test".to_string(),
    };

    router::build(
        AppState::new(PersonService::new(repo), info),
        &WebConfig::default(),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn body_json(resp: Response) -> Value {
    serde_json::from_slice(&resp.into_body().collect().await.unwrap().to_bytes()).unwrap()
}

// ---------------------------------------------------------------------------
// Probes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = app().await;
    let resp = send(&app, "GET", "/health", None).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "ok");
}

#[tokio::test]
async fn should_report_meta_without_storage() {
    let app = app().await;
    let resp = send(&app, "GET", "/api/meta", None).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["version"], "0.0.0-test");
    assert_eq!(body["environment"], "test");
}

// ---------------------------------------------------------------------------
// Person lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_person_lifecycle() {
    let app = app().await;

    // Create
    let resp = send(
        &app,
        "POST",
        "/api/people",
        Some(json!({"firstName": "Ada", "lastName": "Lovelace", "age": 36})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers()[header::LOCATION], "/api/people/1");
    assert_eq!(
        body_json(resp).await,
        json!({"id": 1, "firstName": "Ada", "lastName": "Lovelace", "age": 36})
    );

    // Get
    let resp = send(&app, "GET", "/api/people/1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"id": 1, "firstName": "Ada", "lastName": "Lovelace", "age": 36})
    );

    // Delete
    let resp = send(&app, "DELETE", "/api/people/1", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(resp.into_body().collect().await.unwrap().to_bytes().is_empty());

    // Gone
    let resp = send(&app, "GET", "/api/people/1", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_ignore_client_supplied_id_on_create() {
    let app = app().await;
    let resp = send(
        &app,
        "POST",
        "/api/people",
        Some(json!({"id": 42, "firstName": "Grace", "lastName": "Hopper", "age": 85})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(body_json(resp).await["id"], 1);
    let resp = send(&app, "GET", "/api/people/42", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_default_missing_fields_on_create() {
    let app = app().await;
    let resp = send(&app, "POST", "/api/people", Some(json!({}))).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(resp).await,
        json!({"id": 1, "firstName": "", "lastName": "", "age": 0})
    );
}

#[tokio::test]
async fn should_list_people_sorted_by_last_then_first_name() {
    let app = app().await;
    let resp = send(&app, "GET", "/api/people", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!([]));

    for (first, last) in [("Grace", "Hopper"), ("Alan", "Turing"), ("Scott", "Aaronson")] {
        send(
            &app,
            "POST",
            "/api/people",
            Some(json!({"firstName": first, "lastName": last, "age": 1})),
        )
        .await;
    }

    let body = body_json(send(&app, "GET", "/api/people", None).await).await;
    let last_names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["lastName"].as_str().unwrap())
        .collect();
    assert_eq!(last_names, vec!["Aaronson", "Hopper", "Turing"]);
}

#[tokio::test]
async fn should_overwrite_all_fields_on_update() {
    let app = app().await;
    send(
        &app,
        "POST",
        "/api/people",
        Some(json!({"firstName": "Ada", "lastName": "Lovelace", "age": 36})),
    )
    .await;

    let resp = send(&app, "PUT", "/api/people/1", Some(json!({"age": 37}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let expected = json!({"id": 1, "firstName": "", "lastName": "", "age": 37});
    assert_eq!(body_json(resp).await, expected);

    let resp = send(&app, "GET", "/api/people/1", None).await;
    assert_eq!(body_json(resp).await, expected);
}

#[tokio::test]
async fn should_return_not_found_when_updating_missing_person() {
    let app = app().await;
    let resp = send(
        &app,
        "PUT",
        "/api/people/9",
        Some(json!({"firstName": "Nobody", "lastName": "Here", "age": 1})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body = body_json(send(&app, "GET", "/api/people", None).await).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn should_return_not_found_when_deleting_missing_person() {
    let app = app().await;
    let resp = send(&app, "DELETE", "/api/people/3", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_json(resp).await["error"].is_string());
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_seed_once() {
    let app = app().await;

    let resp = send(&app, "POST", "/api/people/seed", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({"added": 5, "total": 5, "skipped": false})
    );

    let resp = send(&app, "POST", "/api/people/seed", None).await;
    assert_eq!(
        body_json(resp).await,
        json!({"added": 0, "total": 5, "skipped": true})
    );

    let body = body_json(send(&app, "GET", "/api/people", None).await).await;
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn should_place_new_aaronson_before_seeded_hopper() {
    let app = app().await;
    send(&app, "POST", "/api/people/seed", None).await;
    send(
        &app,
        "POST",
        "/api/people",
        Some(json!({"firstName": "Scott", "lastName": "Aaronson", "age": 53})),
    )
    .await;

    let body = body_json(send(&app, "GET", "/api/people", None).await).await;
    let last_names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["lastName"].as_str().unwrap())
        .collect();
    let aaronson = last_names.iter().position(|n| *n == "Aaronson").unwrap();
    let hopper = last_names.iter().position(|n| *n == "Hopper").unwrap();
    assert_eq!(aaronson, 0);
    assert!(aaronson < hopper);
}
