use super::parse_file_id;
use crate::constants::THUMBNAIL_CACHE_CONTROL;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, Response, StatusCode},
};
use dossier_core::AppError;
use futures::StreamExt;
use std::sync::Arc;

/// `inline` disposition carrying the client filename, reduced to safe header characters
fn content_disposition_inline(filename: &str) -> String {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    format!("inline; filename=\"{}\"", safe)
}

#[utoipa::path(
    get,
    path = "/api/files/{id}/preview",
    tag = "files",
    params(
        ("id" = i64, Path, description = "File ID")
    ),
    responses(
        (status = 200, description = "JPEG thumbnail", content_type = "image/jpeg"),
        (status = 404, description = "File not found", body = ErrorResponse),
        (status = 500, description = "Thumbnail generation failed or original missing", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "preview_file"))]
pub async fn preview_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response<Body>, HttpAppError> {
    let id = parse_file_id(&id)?;
    let file = state.files.get(id).await?;

    let thumbnail = state.files.ensure_thumbnail(&file).await?;

    tracing::debug!(file_id = id, thumbnail = %thumbnail, "Streaming thumbnail");

    let stream = state.storage.download_stream(&thumbnail).await?;

    // Wrap storage stream for axum Body
    let body_stream = stream.map(|result| {
        result.map_err(|e| std::io::Error::other(format!("Storage stream error: {}", e)))
    });

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "image/jpeg")
        .header(header::CACHE_CONTROL, THUMBNAIL_CACHE_CONTROL)
        .header(
            header::CONTENT_DISPOSITION,
            content_disposition_inline(&file.filename),
        )
        .body(Body::from_stream(body_stream))
        .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))?;

    Ok(response)
}
