//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use dossier_core::models;

/// The OpenAPI document served at `/api/openapi.json`
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dossier API",
        version = "0.1.0",
        description = "Upload identity documents (passport, visa, photo), list them grouped by type, delete them and fetch JPEG previews."
    ),
    paths(
        handlers::file_upload::upload_file,
        handlers::file_list::list_files,
        handlers::file_delete::delete_file,
        handlers::file_preview::preview_file,
    ),
    components(
        schemas(
            models::DocumentType,
            models::UploadedFileResponse,
            models::GroupedFilesResponse,
            handlers::file_upload::UploadResponse,
            handlers::MessageResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "files", description = "Document upload, listing, deletion and previews")
    )
)]
pub struct ApiDoc;
