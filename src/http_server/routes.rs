//! Document routes
//!
//! The store runs synchronous engine transactions, so every handler moves
//! its store call onto the blocking pool. Status mapping: List/Get engine
//! or codec failures are a 500; any aborted Put/Delete batch is a 400 with
//! an empty id list, because the transaction persisted nothing. A blocking
//! task that fails to join is a server fault and maps to 500 everywhere.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::WriteAck;
use crate::observability::Logger;
use crate::store::{DocumentStore, ListQuery};

/// List query parameters. `startkey`/`endkey` bound the id range
/// (inclusive); `start` is a zero-based offset and `limit` caps emissions.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub startkey: Option<String>,
    pub endkey: Option<String>,
    pub limit: Option<usize>,
    pub start: Option<usize>,
}

impl From<ListParams> for ListQuery {
    fn from(params: ListParams) -> Self {
        ListQuery {
            start_key: params.startkey,
            end_key: params.endkey,
            limit: params.limit,
            start: params.start.unwrap_or(0),
        }
    }
}

/// Build the document router over a shared store.
pub fn document_routes(store: Arc<DocumentStore>) -> Router {
    Router::new()
        .route(
            "/",
            get(list_handler)
                .put(put_handler)
                .post(put_handler)
                .delete(delete_handler),
        )
        .route("/:id", get(get_handler))
        .with_state(store)
}

async fn list_handler(
    State(store): State<Arc<DocumentStore>>,
    Query(params): Query<ListParams>,
) -> Response {
    let query = ListQuery::from(params);
    let result = tokio::task::spawn_blocking(move || store.list(&query)).await;
    match result {
        Ok(Ok(documents)) => (StatusCode::OK, Json(Value::Array(documents))).into_response(),
        Ok(Err(e)) => {
            Logger::error("LIST_FAILED", &[("error", &e.to_string())]);
            internal_error(&e.to_string())
        }
        Err(e) => task_fault(e),
    }
}

async fn get_handler(
    State(store): State<Arc<DocumentStore>>,
    Path(id): Path<String>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || store.get(&id)).await;
    match result {
        Ok(Ok(Some(document))) => (StatusCode::OK, Json(document)).into_response(),
        Ok(Ok(None)) => (StatusCode::NOT_FOUND, Json(Value::Null)).into_response(),
        Ok(Err(e)) => {
            Logger::error("GET_FAILED", &[("error", &e.to_string())]);
            internal_error(&e.to_string())
        }
        Err(e) => task_fault(e),
    }
}

async fn put_handler(
    State(store): State<Arc<DocumentStore>>,
    Json(body): Json<Value>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || store.put(body)).await;
    match result {
        Ok(Ok(ids)) => (StatusCode::CREATED, Json(WriteAck::success(ids))).into_response(),
        Ok(Err(e)) => {
            Logger::error("PUT_FAILED", &[("error", &e.to_string())]);
            (StatusCode::BAD_REQUEST, Json(WriteAck::failure(e.to_string()))).into_response()
        }
        Err(e) => task_fault(e),
    }
}

async fn delete_handler(
    State(store): State<Arc<DocumentStore>>,
    Json(body): Json<Value>,
) -> Response {
    let result = tokio::task::spawn_blocking(move || store.delete(body)).await;
    match result {
        Ok(Ok(ids)) => (StatusCode::OK, Json(WriteAck::success(ids))).into_response(),
        Ok(Err(e)) => {
            Logger::error("DELETE_FAILED", &[("error", &e.to_string())]);
            (StatusCode::BAD_REQUEST, Json(WriteAck::failure(e.to_string()))).into_response()
        }
        Err(e) => task_fault(e),
    }
}

/// A store task that panicked or was cancelled never reached commit; the
/// client gets a 500, not a validation-style 400.
fn task_fault(e: tokio::task::JoinError) -> Response {
    Logger::error("STORE_TASK_FAILED", &[("error", &e.to_string())]);
    internal_error(&e.to_string())
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_task_fault_maps_to_500() {
        let join_error = tokio::task::spawn_blocking(|| panic!("worker died"))
            .await
            .unwrap_err();
        let response = task_fault(join_error);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
