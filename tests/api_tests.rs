//! API integration tests
//!
//! Drives the production router in-process against the in-memory store.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_api::{api, repository::Repository, services::Services, AppState};

fn app() -> Router {
    api::create_router(AppState::new(Services::new(Repository::in_memory())))
}

/// Send one request and return the status with the decoded body (`Null` if empty)
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

async fn create_author(app: &Router, first: &str, last: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/authors",
        Some(json!({ "firstName": first, "lastName": last })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("No author ID")
}

async fn create_book(app: &Router, author_id: i64) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "The Dispossessed",
            "authorId": author_id,
            "datePublished": "1974-05-01",
            "isFiction": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/ready", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_create_then_get_author() {
    let app = app();
    let id = create_author(&app, "Ursula", "Le Guin").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "Ursula");
    assert_eq!(body["lastName"], "Le Guin");
}

#[tokio::test]
async fn test_list_authors() {
    let app = app();
    create_author(&app, "Ursula", "Le Guin").await;
    create_author(&app, "Iain", "Banks").await;

    let (status, body) = send(&app, Method::GET, "/api/authors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_get_missing_author() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/authors/999", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!("Author could not be found"));
}

#[tokio::test]
async fn test_create_author_without_first_name() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/authors",
        Some(json!({ "lastName": "Le Guin" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "firstName");
    assert!(errors[0]["message"].is_string());

    let (_, authors) = send(&app, Method::GET, "/api/authors", None).await;
    assert_eq!(authors, json!([]));
}

#[tokio::test]
async fn test_update_author() {
    let app = app();
    let id = create_author(&app, "Iain", "Banks").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/authors/{}", id),
        Some(json!({ "firstName": "Iain M.", "lastName": "Banks" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["firstName"], "Iain M.");
}

#[tokio::test]
async fn test_update_missing_author() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/authors/41",
        Some(json!({ "firstName": "No", "lastName": "One" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_string());
}

#[tokio::test]
async fn test_delete_author_answers_404() {
    let app = app();
    let id = create_author(&app, "Ann", "Leckie").await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!("Author has been deleted sucessfully"));

    let (status, _) = send(&app, Method::GET, &format!("/api/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_author_with_books_fails() {
    let app = app();
    let id = create_author(&app, "Ursula", "Le Guin").await;
    create_book(&app, id).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_string());

    let (status, _) = send(&app, Method::GET, &format!("/api/authors/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_book_embeds_author() {
    let app = app();
    let author_id = create_author(&app, "Ursula", "Le Guin").await;
    let book = create_book(&app, author_id).await;

    assert_eq!(book["author"]["id"], author_id);
    assert_eq!(book["author"]["firstName"], "Ursula");
    assert_eq!(book["author"]["lastName"], "Le Guin");
    assert_eq!(book["datePublished"], "1974-05-01T00:00:00Z");
    assert_eq!(book["isFiction"], true);
    assert!(book.get("authorId").is_none());

    let (status, books) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(books, json!([book]));
}

#[tokio::test]
async fn test_create_book_with_unknown_author() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "Nobody's Book",
            "authorId": 77,
            "datePublished": "2020-01-01",
            "isFiction": false
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_string());
}

#[tokio::test]
async fn test_create_book_reports_each_invalid_field() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": 5, "authorId": "x", "datePublished": "soon" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("No errors array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["authorId", "datePublished", "isFiction", "title"]);
}

#[tokio::test]
async fn test_get_missing_book() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/books/12", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!("Book could not be found"));
}

#[tokio::test]
async fn test_update_book_is_idempotent() {
    let app = app();
    let author_id = create_author(&app, "Ursula", "Le Guin").await;
    let book = create_book(&app, author_id).await;
    let uri = format!("/api/books/{}", book["id"]);
    let payload = json!({
        "title": "The Dispossessed: An Ambiguous Utopia",
        "authorId": author_id,
        "datePublished": "1974/05/01",
        "isFiction": "true"
    });

    let (first_status, first) = send(&app, Method::PUT, &uri, Some(payload.clone())).await;
    let (second_status, second) = send(&app, Method::PUT, &uri, Some(payload)).await;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::CREATED);
    assert_eq!(first, second);
    assert_eq!(first["datePublished"], "1974-05-01T00:00:00Z");

    let (_, stored) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(stored, second);
}

#[tokio::test]
async fn test_update_missing_book() {
    let app = app();
    let author_id = create_author(&app, "Ursula", "Le Guin").await;
    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/books/500",
        Some(json!({
            "title": "Ghost",
            "authorId": author_id,
            "datePublished": "2000-01-01",
            "isFiction": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_string());
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let author_id = create_author(&app, "Ursula", "Le Guin").await;
    let book = create_book(&app, author_id).await;
    let uri = format!("/api/books/{}", book["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_non_numeric_id_is_rejected() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/books/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.is_string());
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/authors")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/books/{id}"].is_object());
}

#[tokio::test]
async fn test_update_author_validates_body() {
    let app = app();
    let id = create_author(&app, "Iain", "Banks").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/authors/{}", id),
        Some(json!({ "firstName": 5 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("No errors array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["firstName", "lastName"]);
    assert_eq!(body["errors"][0]["message"], "firstName must be a string");

    let (_, author) = send(&app, Method::GET, &format!("/api/authors/{}", id), None).await;
    assert_eq!(author["firstName"], "Iain");
}

#[tokio::test]
async fn test_update_book_without_author_id() {
    let app = app();
    let author_id = create_author(&app, "Ursula", "Le Guin").await;
    let book = create_book(&app, author_id).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{}", book["id"]),
        Some(json!({
            "title": "The Dispossessed",
            "datePublished": "1974-05-01",
            "isFiction": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let errors = body["errors"].as_array().expect("No errors array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "authorId");
}

#[tokio::test]
async fn test_delete_missing_author() {
    let app = app();
    let (status, body) = send(&app, Method::DELETE, "/api/authors/999", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_string());
}

#[tokio::test]
async fn test_create_book_accepts_integral_float_author_id() {
    let app = app();
    let author_id = create_author(&app, "Ann", "Leckie").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "Ancillary Justice",
            "authorId": author_id as f64,
            "datePublished": "2013-10-01",
            "isFiction": "true"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["author"]["id"], author_id);
}

#[tokio::test]
async fn test_create_book_rejects_loose_values() {
    let app = app();
    let author_id = create_author(&app, "Ann", "Leckie").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "Ancillary Justice",
            "authorId": format!(" {} ", author_id),
            "datePublished": "2013-1-1",
            "isFiction": true
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .expect("No errors array")
        .iter()
        .filter_map(|e| e["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["authorId", "datePublished"]);
}
