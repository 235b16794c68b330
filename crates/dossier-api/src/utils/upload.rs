//! Multipart extraction for file uploads

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use dossier_core::AppError;
use dossier_processing::{IncomingFile, RawUpload};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

fn multipart_error(e: MultipartError, what: &str) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Request body is too large".to_string())
    } else {
        AppError::InvalidInput(format!("Failed to read {}: {}", what, e))
    }
}

/// Collect the `file` and `type` fields of an upload form.
///
/// Presence and content rules are left to the validator; this only rejects
/// malformed bodies and more than one `file` part. Unknown fields are ignored.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<RawUpload, AppError> {
    let mut raw = RawUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "multipart"))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if raw.file.is_some() {
                    return Err(AppError::Validation {
                        field: "file",
                        message: "Exactly one file may be uploaded.".to_string(),
                    });
                }

                // A part without a filename is a plain text field, not a file
                let Some(filename) = field.file_name().map(str::to_string) else {
                    continue;
                };
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "file data"))?;

                raw.file = Some(IncomingFile {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "type" => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "type field"))?;
                raw.document_type = Some(value);
            }
            _ => {}
        }
    }

    Ok(raw)
}
