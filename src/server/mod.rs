//! HTTP surface.
//!
//! | Route | Request | Response |
//! |-------|---------|----------|
//! | `GET /analyze?text=...` | one review | `{"sentiment": 0 \| 1}` (class index) |
//! | `POST /process_csv` | multipart field `file` with a `.csv` upload | array of row objects with `sentiment` and `category` added |
//! | `GET /health` | | `{"status": "ok"}` |
//!
//! Errors are returned as `{"error": "..."}`. Inference runs on the blocking thread pool
//! against one shared, read-only pipeline.

mod error;

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::ApiError;

use crate::bulk::{BulkAnalyzer, ResultRow, ReviewTable};
use crate::config::ServerConfig;
use crate::sentiment::{SentimentAnalysisPipeline, SequenceClassifier, TextEncoder};

/// State shared by every request.
pub struct AppState<M: SequenceClassifier, E: TextEncoder> {
    pipeline: Arc<SentimentAnalysisPipeline<M, E>>,
}

impl<M: SequenceClassifier, E: TextEncoder> AppState<M, E> {
    /// Serve requests with `pipeline`.
    pub fn new(pipeline: SentimentAnalysisPipeline<M, E>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Query string of `GET /analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    /// Review to classify.
    pub text: Option<String>,
}

/// Body of a successful `GET /analyze`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeResponse {
    /// Predicted class index: 0 = Negative, 1 = Positive.
    pub sentiment: u32,
}

/// Build the application router.
pub fn router<M, E>(state: AppState<M, E>, max_upload_bytes: usize) -> Router
where
    M: SequenceClassifier + Send + Sync + 'static,
    E: TextEncoder + Send + Sync + 'static,
{
    Router::new()
        .route("/analyze", get(analyze::<M, E>))
        .route("/process_csv", post(process_csv::<M, E>))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn serve<M, E>(config: &ServerConfig, state: AppState<M, E>) -> std::io::Result<()>
where
    M: SequenceClassifier + Send + Sync + 'static,
    E: TextEncoder + Send + Sync + 'static,
{
    let app = router(state, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn analyze<M, E>(
    State(state): State<Arc<AppState<M, E>>>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<AnalyzeResponse>, ApiError>
where
    M: SequenceClassifier + Send + Sync + 'static,
    E: TextEncoder + Send + Sync + 'static,
{
    let text = params
        .text
        .ok_or_else(|| ApiError::bad_request("No text provided"))?;

    let pipeline = Arc::clone(&state.pipeline);
    let sentiment = tokio::task::spawn_blocking(move || pipeline.predict(&text))
        .await
        .map_err(|e| ApiError::internal(format!("Inference task failed: {e}")))??;

    Ok(Json(AnalyzeResponse { sentiment }))
}

async fn process_csv<M, E>(
    State(state): State<Arc<AppState<M, E>>>,
    mut multipart: Multipart,
) -> Result<Json<Vec<ResultRow>>, ApiError>
where
    M: SequenceClassifier + Send + Sync + 'static,
    E: TextEncoder + Send + Sync + 'static,
{
    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| ApiError::bad_request("No file part in the request"))?;
    if filename.is_empty() {
        return Err(ApiError::bad_request("No selected file"));
    }
    if !filename.ends_with(".csv") {
        return Err(ApiError::bad_request(
            "Invalid file format, only CSV files are allowed",
        ));
    }

    let table = ReviewTable::from_csv_bytes(&data)?;
    // Reject a bad schema before handing work to the inference pool.
    table.texts()?;
    info!(%filename, rows = table.len(), "processing upload");

    let pipeline = Arc::clone(&state.pipeline);
    let rows = tokio::task::spawn_blocking(move || BulkAnalyzer::new(&*pipeline).process(&table))
        .await
        .map_err(|e| ApiError::internal(format!("Inference task failed: {e}")))??;

    Ok(Json(rows))
}
