use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use axum::{extract::State, Json};
use dossier_core::models::{GroupedFilesResponse, UploadedFileResponse};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    responses(
        (status = 200, description = "Files grouped by document type", body = GroupedFilesResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "list_files"))]
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GroupedFilesResponse>, HttpAppError> {
    let groups = state.files.list_grouped().await?;
    let base_url = state.config.public_base_url();

    tracing::debug!(count = groups.len(), "Listing files");

    let response = groups.map(|file| UploadedFileResponse::new(file, base_url));
    Ok(Json(response.into()))
}
