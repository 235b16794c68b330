//! HTTP handlers for the file endpoints

pub mod file_delete;
pub mod file_list;
pub mod file_preview;
pub mod file_upload;

use crate::constants::FILE_NOT_FOUND;
use dossier_core::AppError;
use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement body for mutations
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// Parse an `{id}` path segment; anything that is not a record id is simply not found
pub(crate) fn parse_file_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::NotFound(FILE_NOT_FOUND.to_string()))
}
