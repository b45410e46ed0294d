use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::{Json, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use uuid::Uuid;

use crate::core::{
    RaioXInput, RaioXSummary, base_projection_series, build_raiox_summary, default_raiox_input,
};
use crate::error::{StoreError, ValidationError};
use crate::store::SnapshotStore;

#[derive(Clone)]
struct AppState {
    store: Arc<SnapshotStore>,
}

#[derive(Debug, Error)]
enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("INTERNAL: {0}")]
    Task(#[from] JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) | ApiError::Store(StoreError::NonFinite(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, &self.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(store: Arc<SnapshotStore>) -> Router {
    Router::new()
        .route("/api/raiox/default", get(default_input_handler))
        .route("/api/raiox/summary", post(summary_handler))
        .route("/api/raiox/projection", post(projection_handler))
        .route(
            "/api/snapshots",
            get(list_snapshots_handler).post(save_snapshot_handler),
        )
        .route("/api/snapshots/trend", get(score_trend_handler))
        .route("/api/snapshots/:id", delete(delete_snapshot_handler))
        .route("/api/snapshots/:id/input", get(load_snapshot_handler))
        .fallback(not_found_handler)
        .with_state(AppState { store })
}

pub async fn run_http_server(addr: SocketAddr, store: Arc<SnapshotStore>) -> std::io::Result<()> {
    let app = router(store);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Raio-X HTTP API listening");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn default_input_handler() -> Response {
    json_response(StatusCode::OK, default_raiox_input())
}

async fn summary_handler(body: String) -> Result<Response, ApiError> {
    let (_, summary) = summary_from_json(&body)?;
    Ok(json_response(StatusCode::OK, summary))
}

async fn projection_handler(body: String) -> Result<Response, ApiError> {
    let input = RaioXInput::from_json(&body)?;
    let series = base_projection_series(&input)?;
    Ok(json_response(StatusCode::OK, series))
}

async fn list_snapshots_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let snapshots = with_store(&state, |store| store.list_snapshots()).await?;
    Ok(json_response(StatusCode::OK, snapshots))
}

async fn save_snapshot_handler(
    State(state): State<AppState>,
    body: String,
) -> Result<Response, ApiError> {
    let (input, summary) = summary_from_json(&body)?;
    let snapshot =
        with_store(&state, move |store| store.save_snapshot(&input, &summary)).await??;
    Ok(json_response(StatusCode::CREATED, snapshot))
}

async fn score_trend_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let trend = with_store(&state, |store| store.score_trend()).await?;
    Ok(json_response(StatusCode::OK, trend))
}

async fn delete_snapshot_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    with_store(&state, move |store| store.delete_snapshot(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn load_snapshot_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let input = with_store(&state, move |store| store.load_snapshot(id))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("snapshot {id}")))?;
    Ok(json_response(StatusCode::OK, input))
}

/// Runs a store call on the blocking pool; the store does synchronous file I/O.
async fn with_store<T, F>(state: &AppState, call: F) -> Result<T, JoinError>
where
    F: FnOnce(&SnapshotStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || call(&store)).await
}

fn summary_from_json(json: &str) -> Result<(RaioXInput, RaioXSummary), ValidationError> {
    let input = RaioXInput::from_json(json)?;
    let summary = build_raiox_summary(&input)?;
    tracing::debug!(score = summary.score, "diagnostic built");
    Ok((input, summary))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
