//! Router and handlers.

use crate::response::download_url;
use crate::{ApiError, GenerateResponse, StatusResponse, VideoEntry};
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use fresco_core::{JobId, JobRequest};
use fresco_error::{FrescoResult, HttpError, StorageError, StorageErrorKind};
use fresco_pipeline::JobQueue;
use serde_json::json;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tracing::{info, instrument};

/// Shared handler state.
#[derive(Clone)]
pub struct ApiState {
    queue: Arc<JobQueue>,
}

impl ApiState {
    /// State over a running queue.
    pub fn new(queue: Arc<JobQueue>) -> Self {
        Self { queue }
    }
}

/// Build the submission router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/videos/generate", post(generate))
        .route("/api/v1/videos/status/:id", get(job_status))
        .route("/api/v1/videos/list", get(list_videos))
        .route("/api/v1/videos/download/:name", get(download))
        .route("/api/v1/videos/stream/:name", get(stream))
        .with_state(state)
}

/// Bind `host:port` and serve until Ctrl-C.
///
/// # Errors
///
/// Returns an `HttpError` if the address cannot be bound or the server
/// stops abnormally.
#[instrument(skip(queue))]
pub async fn serve(host: &str, port: u16, queue: Arc<JobQueue>) -> FrescoResult<()> {
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}:{}: {}", host, port, e)))?;
    info!(host, port, "Listening");

    axum::serve(listener, create_router(ApiState::new(queue)))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutting down");
            }
        })
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;
    Ok(())
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "healthy", "version": env!("CARGO_PKG_VERSION")})),
    )
}

#[instrument(skip_all)]
async fn generate(
    State(state): State<ApiState>,
    Json(request): Json<JobRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let handle = state.queue.submit(request)?;
    let ack = handle.ack().clone();
    info!(job_id = %ack.job_id, filename = %ack.video_filename, "Accepted generate request");
    Ok(Json(GenerateResponse {
        success: true,
        message: "Video generation started".to_string(),
        download_url: download_url(&ack.video_filename),
        ack,
    }))
}

async fn job_status(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let job_id = JobId::parse(&id)?;
    let status = state.queue.status(&job_id).ok_or_else(|| {
        fresco_error::FrescoError::from(StorageError::new(StorageErrorKind::NotFound(format!(
            "job {}",
            job_id
        ))))
    })?;
    Ok(Json(StatusResponse { job_id, status }))
}

async fn list_videos(State(state): State<ApiState>) -> Result<Json<Vec<VideoEntry>>, ApiError> {
    let videos = state
        .queue
        .list_published()
        .await?
        .into_iter()
        .map(|name| VideoEntry {
            path: download_url(&name),
            name,
        })
        .collect();
    Ok(Json(videos))
}

/// Serve a published video as an attachment.
#[instrument(skip_all)]
async fn download(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let disposition = format!("attachment; filename=\"{}\"", name);
    video_body(&state, &name, disposition).await
}

/// Serve a published video for inline playback.
#[instrument(skip_all)]
async fn stream(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let disposition = format!("inline; filename=\"{}\"", name);
    video_body(&state, &name, disposition).await
}

/// Stream the file in chunks instead of buffering the whole video.
async fn video_body(
    state: &ApiState,
    name: &str,
    disposition: String,
) -> Result<Response, ApiError> {
    let path = state.queue.retrieve(name).await?;
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| fresco_error::FrescoError::from(StorageError::read(&path, e)))?;
    let length = file
        .metadata()
        .await
        .map_err(|e| fresco_error::FrescoError::from(StorageError::read(&path, e)))?
        .len();

    Ok((
        [
            (header::CONTENT_TYPE, content_type(name).to_string()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CONTENT_LENGTH, length.to_string()),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}

fn content_type(name: &str) -> &'static str {
    let ext = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("webm") => "video/webm",
        Some("ogg") => "video/ogg",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        _ => "video/mp4",
    }
}
