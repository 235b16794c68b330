use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::read_upload_form;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use dossier_core::models::UploadedFileResponse;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    pub data: UploadedFileResponse,
}

#[utoipa::path(
    post,
    path = "/api/files",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "`file`: the document (pdf, png, jpg). `type`: passport, visa or photo"),
    responses(
        (status = 201, description = "File uploaded successfully", body = UploadResponse),
        (status = 400, description = "Malformed multipart body", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_file"))]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), HttpAppError> {
    let raw = read_upload_form(multipart).await?;
    let upload = state.validator.validate(raw)?;

    let file = state.files.store(upload).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded successfully.".to_string(),
            data: UploadedFileResponse::new(file, state.config.public_base_url()),
        }),
    ))
}
