//! Mock REST backend for filedeck.
//!
//! Serves a json-server compatible `/files` collection from a `db.json`
//! document so the client can be exercised without a real backend.

pub mod db;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use filedeck_core::error::Result;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::info;

pub use db::{InsertError, JsonDb};

/// Default port, matching the default JSON server URL.
pub const DEFAULT_PORT: u16 = 3000;

type AppState = Arc<JsonDb>;

/// Builds the HTTP routes over `db`.
pub fn router(db: Arc<JsonDb>) -> Router {
    Router::new()
        .route("/files", get(list_files).post(create_file))
        .route("/files/{id}", get(get_file).delete(delete_file))
        .with_state(db)
}

/// Serves `db` on an already bound listener until the task is dropped.
pub async fn serve(listener: TcpListener, db: JsonDb) -> Result<()> {
    let addr = listener.local_addr()?;
    info!("[MockServer] serving {} on http://{}", db.path().display(), addr);
    axum::serve(listener, router(Arc::new(db))).await?;
    Ok(())
}

/// Opens `db_path` and serves it on `127.0.0.1:port`.
pub async fn run(db_path: PathBuf, port: u16) -> Result<()> {
    let db = JsonDb::open(db_path).await?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    serve(listener, db).await
}

async fn list_files(State(db): State<AppState>) -> impl IntoResponse {
    Json(Value::Array(db.list().await))
}

async fn get_file(State(db): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match db.get(&id).await {
        Some(record) => (StatusCode::OK, Json(record)),
        None => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}

async fn create_file(State(db): State<AppState>, Json(payload): Json<Value>) -> impl IntoResponse {
    let Value::Object(record) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "expected a JSON object" })),
        );
    };

    match db.insert(record).await {
        Ok(created) => (StatusCode::CREATED, Json(created)),
        Err(InsertError::DuplicateId(id)) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": format!("duplicate id '{}'", id) })),
        ),
        Err(InsertError::IdsExhausted) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": InsertError::IdsExhausted.to_string() })),
        ),
        Err(InsertError::Storage(e)) => {
            tracing::error!("[MockServer] insert failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}

async fn delete_file(State(db): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match db.remove(&id).await {
        Ok(true) => (StatusCode::OK, Json(json!({}))),
        Ok(false) => (StatusCode::NOT_FOUND, Json(json!({}))),
        Err(e) => {
            tracing::error!("[MockServer] delete failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
        }
    }
}
