//! Application state shared by every handler.

use crate::services::FileService;
use dossier_core::Config;
use dossier_db::FileRepository;
use dossier_processing::{ThumbnailGenerator, UploadValidator};
use dossier_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub repository: Arc<dyn FileRepository>,
    pub validator: UploadValidator,
    pub files: FileService,
}

impl AppState {
    /// Wire services from their backing stores
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        repository: Arc<dyn FileRepository>,
    ) -> Self {
        let thumbnails = ThumbnailGenerator::from_config(storage.clone(), &config);
        let files = FileService::new(storage.clone(), repository.clone(), thumbnails);
        Self {
            validator: UploadValidator::from_config(&config),
            config,
            storage,
            repository,
            files,
        }
    }
}
