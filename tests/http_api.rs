//! End-to-end HTTP tests
//!
//! Drive the document router directly with tower's oneshot, no listener
//! involved. Covers the full put/get/delete round trip and the status
//! mapping for each operation.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use sofadb::http_server::document_routes;
use sofadb::storage::Engine;
use sofadb::store::DocumentStore;

fn temp_router() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let engine = Arc::new(Engine::open(dir.path()).unwrap());
    let store = Arc::new(DocumentStore::new(engine));
    (document_routes(store), dir)
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_end_to_end_document_lifecycle() {
    let (router, _dir) = temp_router();

    // Create.
    let (status, ack) = send(&router, "PUT", "/", Some(json!([{"id": "a", "v": 1}]))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ack["ok"], "true");
    assert_eq!(ack["id"], json!(["a"]));

    // Read back: the stored document carries a server timestamp.
    let (status, doc) = send(&router, "GET", "/a", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["id"], "a");
    assert_eq!(doc["v"], 1);
    assert!(doc["_timestamp"].is_i64());

    // Delete.
    let (status, ack) = send(&router, "DELETE", "/", Some(json!(["a"]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack["ok"], "true");
    assert_eq!(ack["id"], json!(["a"]));

    // Gone.
    let (status, body) = send(&router, "GET", "/a", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_post_is_equivalent_to_put() {
    let (router, _dir) = temp_router();
    let (status, ack) = send(&router, "POST", "/", Some(json!({"id": "p"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ack["id"], json!(["p"]));
}

#[tokio::test]
async fn test_get_missing_document_is_404_null() {
    let (router, _dir) = temp_router();
    let (status, body) = send(&router, "GET", "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_list_with_query_parameters() {
    let (router, _dir) = temp_router();
    let docs: Vec<Value> = ["a", "b", "c", "d", "e"]
        .iter()
        .map(|id| json!({"id": id}))
        .collect();
    send(&router, "PUT", "/", Some(Value::Array(docs))).await;

    let (status, body) = send(&router, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);

    let (status, body) = send(&router, "GET", "/?startkey=b&endkey=d", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["b", "c", "d"]);

    let (status, body) = send(&router, "GET", "/?start=1&limit=2", None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["b", "c"]);
}

#[tokio::test]
async fn test_failed_put_batch_reports_no_ids() {
    let (router, _dir) = temp_router();
    let (status, ack) = send(
        &router,
        "PUT",
        "/",
        Some(json!([{"id": "valid"}, {"id": null}])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(ack["ok"], "false");
    assert_eq!(ack["id"], json!([]));
    assert!(ack["message"].is_string());

    // The valid half never landed.
    let (status, _) = send(&router, "GET", "/valid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_with_bad_entry_is_400() {
    let (router, _dir) = temp_router();
    let (status, ack) = send(&router, "DELETE", "/", Some(json!([{"name": "no id"}]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(ack["ok"], "false");
    assert_eq!(ack["id"], json!([]));
}

#[tokio::test]
async fn test_generated_id_flows_back_through_the_api() {
    let (router, _dir) = temp_router();
    let (status, ack) = send(&router, "PUT", "/", Some(json!({"anon": true}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = ack["id"][0].as_str().unwrap().to_string();

    let (status, doc) = send(&router, "GET", &format!("/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["id"].as_str().unwrap(), id);
}
