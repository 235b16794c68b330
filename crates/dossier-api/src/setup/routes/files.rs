//! File endpoints

use crate::constants::API_PREFIX;
use crate::handlers;
use crate::state::AppState;
use axum::routing::{delete, get};
use axum::Router;
use std::sync::Arc;

pub fn file_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("{}/files", API_PREFIX),
            get(handlers::file_list::list_files).post(handlers::file_upload::upload_file),
        )
        .route(
            &format!("{}/files/{{id}}", API_PREFIX),
            delete(handlers::file_delete::delete_file),
        )
        .route(
            &format!("{}/files/{{id}}/preview", API_PREFIX),
            get(handlers::file_preview::preview_file),
        )
}
