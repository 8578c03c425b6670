//! Attachment streaming endpoints.
//!
//! Bytes leave the blob store one chunk at a time; a whole video is never
//! buffered in memory.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;

use crate::common::BlobId;
use crate::kernel::MediaKind;
use crate::server::app::AxumAppState;
use crate::server::error::ApiError;

/// GET /image/:file_id - stream stored image bytes
pub async fn image_handler(
    State(state): State<AxumAppState>,
    Path(file_id): Path<BlobId>,
) -> Result<Response, ApiError> {
    stream_media(&state, file_id, MediaKind::Image).await
}

/// GET /video/:file_id - stream stored video bytes
pub async fn video_handler(
    State(state): State<AxumAppState>,
    Path(file_id): Path<BlobId>,
) -> Result<Response, ApiError> {
    stream_media(&state, file_id, MediaKind::Video).await
}

/// Open a blob and stream it out.
///
/// An unknown handle answers 404. So does a handle stored under the other
/// media kind: the bucket in the URL must match how the file was stored.
async fn stream_media(
    state: &AxumAppState,
    file_id: BlobId,
    kind: MediaKind,
) -> Result<Response, ApiError> {
    let object = state
        .server_deps
        .blobs
        .open(file_id)
        .await?
        .filter(|object| object.meta.kind == kind)
        .ok_or_else(|| ApiError::NotFound("File not found".to_string()))?;

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, object.meta.content_type)
        .header(header::CONTENT_LENGTH, object.meta.size_bytes.to_string())
        .body(Body::from_stream(object.stream))
        .map_err(|e| anyhow::anyhow!("Failed to build stream response: {}", e))?;

    Ok(response)
}
