//! API integration tests, driven in-process through the router

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use bookshelf_server::{api, AppState};

fn app() -> Router {
    api::create_router(AppState::new())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, body)
}

fn hobbit(page_count: u32, read_page: u32) -> Value {
    json!({
        "name": "The Hobbit",
        "year": 1937,
        "author": "J. R. R. Tolkien",
        "summary": "There and back again",
        "publisher": "Allen & Unwin",
        "pageCount": page_count,
        "readPage": read_page,
        "reading": true
    })
}

async fn create(app: &Router, body: Value) -> String {
    let (status, body) = send(app, Method::POST, "/books", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["bookId"].as_str().expect("No bookId in response").to_string()
}

async fn list(app: &Router, uri: &str) -> Vec<Value> {
    let (status, body) = send(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    body["data"]["books"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    create(&app, hobbit(10, 1)).await;
    let (status, body) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"], 1);
}

#[tokio::test]
async fn test_create_book() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(hobbit(100, 100))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil ditambahkan");
    assert!(body["data"]["bookId"].is_string());
    assert_eq!(list(&app, "/books").await.len(), 1);
}

#[tokio::test]
async fn test_create_rejects_read_page_over_page_count() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/books", Some(hobbit(100, 101))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(
        body["message"],
        "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
    );
    assert!(list(&app, "/books").await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_missing_name() {
    let app = app();
    let mut payload = hobbit(100, 10);
    payload.as_object_mut().unwrap().remove("name");
    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal menambahkan buku. Mohon isi nama buku");

    let mut payload = hobbit(100, 10);
    payload["name"] = json!("");
    let (status, _) = send(&app, Method::POST, "/books", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(list(&app, "/books").await.is_empty());
}

#[tokio::test]
async fn test_create_rejects_malformed_body() {
    let app = app();
    let mut payload = hobbit(100, 10);
    payload["pageCount"] = json!("many");
    let (status, body) = send(&app, Method::POST, "/books", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_create_accepts_null_numbers_and_flags() {
    let app = app();
    let id = create(
        &app,
        json!({"name": "Dune", "year": null, "pageCount": 10, "readPage": null, "reading": null}),
    )
    .await;

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let book = &body["data"]["book"];
    assert_eq!(book["year"], 0);
    assert_eq!(book["readPage"], 0);
    assert_eq!(book["reading"], false);
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = app();
    let id = create(&app, hobbit(100, 50)).await;
    let (status, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let book = &body["data"]["book"];
    assert_eq!(book["id"], id.as_str());
    assert_eq!(book["name"], "The Hobbit");
    assert_eq!(book["year"], 1937);
    assert_eq!(book["author"], "J. R. R. Tolkien");
    assert_eq!(book["summary"], "There and back again");
    assert_eq!(book["publisher"], "Allen & Unwin");
    assert_eq!(book["pageCount"], 100);
    assert_eq!(book["readPage"], 50);
    assert_eq!(book["reading"], true);
    assert_eq!(book["finished"], false);
    assert!(book["insertedAt"].is_string());
    assert_eq!(book["insertedAt"], book["updatedAt"]);
}

#[tokio::test]
async fn test_client_cannot_set_finished() {
    let app = app();
    let mut payload = hobbit(100, 10);
    payload["finished"] = json!(true);
    let id = create(&app, payload).await;

    let (_, body) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    assert_eq!(body["data"]["book"]["finished"], false);
}

#[tokio::test]
async fn test_get_unknown_book() {
    let (status, body) = send(&app(), Method::GET, "/books/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Buku tidak ditemukan");
}

#[tokio::test]
async fn test_list_projects_summary() {
    let app = app();
    let id = create(&app, hobbit(10, 1)).await;
    let books = list(&app, "/books").await;

    assert_eq!(
        books,
        vec![json!({"id": id, "name": "The Hobbit", "publisher": "Allen & Unwin"})]
    );
}

#[tokio::test]
async fn test_list_filter_by_name_is_case_insensitive() {
    let app = app();
    let hobbit_id = create(&app, hobbit(10, 1)).await;
    create(&app, json!({"name": "Dune", "pageCount": 10, "readPage": 10})).await;

    let books = list(&app, "/books?name=hobbit").await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], hobbit_id.as_str());
}

#[tokio::test]
async fn test_list_filter_without_match_returns_everything() {
    let app = app();
    create(&app, hobbit(10, 1)).await;
    create(&app, json!({"name": "Dune", "pageCount": 10, "readPage": 10})).await;

    assert_eq!(list(&app, "/books?name=silmarillion").await.len(), 2);
}

#[tokio::test]
async fn test_list_filter_by_reading_and_finished() {
    let app = app();
    create(&app, hobbit(10, 1)).await;
    let dune = create(
        &app,
        json!({"name": "Dune", "pageCount": 10, "readPage": 10, "reading": false}),
    )
    .await;

    let books = list(&app, "/books?reading=0").await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], dune.as_str());

    let books = list(&app, "/books?finished=1").await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], dune.as_str());
}

#[tokio::test]
async fn test_list_name_filter_takes_precedence() {
    let app = app();
    let hobbit_id = create(&app, hobbit(10, 1)).await;
    create(
        &app,
        json!({"name": "Dune", "pageCount": 10, "readPage": 10, "reading": false}),
    )
    .await;

    // reading=0 would select Dune, but the name filter wins
    let books = list(&app, "/books?name=HOBBIT&reading=0").await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], hobbit_id.as_str());
}

#[tokio::test]
async fn test_list_unrecognized_flag_values_return_everything() {
    let app = app();
    create(&app, hobbit(10, 1)).await;
    create(&app, json!({"name": "Dune", "pageCount": 10, "readPage": 10})).await;

    for uri in ["/books?reading=true", "/books?finished=", "/books?reading=256"] {
        assert_eq!(list(&app, uri).await.len(), 2, "{}", uri);
    }
}

#[tokio::test]
async fn test_update_book() {
    let app = app();
    let id = create(&app, hobbit(100, 10)).await;
    let (_, before) = send(&app, Method::GET, &format!("/books/{}", id), None).await;

    let mut payload = hobbit(100, 100);
    payload["name"] = json!("The Hobbit, or There and Back Again");
    let (status, body) = send(&app, Method::PUT, &format!("/books/{}", id), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil diperbarui");

    let (_, after) = send(&app, Method::GET, &format!("/books/{}", id), None).await;
    let before = &before["data"]["book"];
    let after = &after["data"]["book"];
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["insertedAt"], before["insertedAt"]);
    assert_eq!(after["name"], "The Hobbit, or There and Back Again");
    assert_eq!(after["finished"], true);
}

#[tokio::test]
async fn test_update_unknown_book() {
    let (status, body) = send(&app(), Method::PUT, "/books/unknown", Some(hobbit(10, 1))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "Gagal memperbarui buku. Id tidak ditemukan");
}

#[tokio::test]
async fn test_update_rejects_invalid_payload_without_mutation() {
    let app = app();
    let id = create(&app, hobbit(100, 10)).await;
    let uri = format!("/books/{}", id);
    let (_, before) = send(&app, Method::GET, &uri, None).await;

    let (status, body) = send(&app, Method::PUT, &uri, Some(hobbit(100, 200))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Gagal memperbarui buku. readPage tidak boleh lebih besar dari pageCount"
    );

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"pageCount": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Gagal memperbarui buku. Mohon isi nama buku");

    let (_, after) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_delete_book() {
    let app = app();
    let keep = create(&app, json!({"name": "Dune", "pageCount": 10})).await;
    let id = create(&app, hobbit(10, 1)).await;
    let uri = format!("/books/{}", id);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Buku berhasil dihapus");

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let books = list(&app, "/books").await;
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], keep.as_str());
}

#[tokio::test]
async fn test_delete_unknown_book() {
    let (status, body) = send(&app(), Method::DELETE, "/books/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Buku gagal dihapus. Id tidak ditemukan");
}

#[tokio::test]
async fn test_openapi_document() {
    let (status, body) = send(&app(), Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/books"].is_object());
    assert!(body["paths"]["/books/{id}"].is_object());
}
