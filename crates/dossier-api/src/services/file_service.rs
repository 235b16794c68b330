//! File lifecycle: ingestion, listing, deletion and previews.
//!
//! Blobs and records live in different systems with no shared transaction, so
//! each operation orders its steps to never leave an unreachable blob behind:
//! ingestion removes the blob again when the insert fails, and deletion removes
//! the blob before the record.

use crate::constants::FILE_NOT_FOUND;
use crate::error::storage_app_error;
use dossier_core::models::{GroupedFiles, NewUploadedFile, UploadedFile};
use dossier_core::AppError;
use dossier_db::FileRepository;
use dossier_processing::{thumbnail_path, ThumbnailError, ThumbnailGenerator, ValidatedUpload};
use dossier_storage::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct FileService {
    storage: Arc<dyn Storage>,
    repository: Arc<dyn FileRepository>,
    thumbnails: ThumbnailGenerator,
}

impl FileService {
    pub fn new(
        storage: Arc<dyn Storage>,
        repository: Arc<dyn FileRepository>,
        thumbnails: ThumbnailGenerator,
    ) -> Self {
        Self {
            storage,
            repository,
            thumbnails,
        }
    }

    /// Persist a validated upload: blob first, then its record
    #[tracing::instrument(skip(self, upload), fields(
        filename = %upload.filename,
        document_type = %upload.document_type,
        size = upload.size()
    ))]
    pub async fn store(&self, upload: ValidatedUpload) -> Result<UploadedFile, AppError> {
        let size = upload.size() as i64;
        let ValidatedUpload {
            filename,
            mime_type,
            document_type,
            data,
            ..
        } = upload;

        let prefix = format!("uploads/{}", document_type);
        let path = self
            .storage
            .upload(&prefix, &filename, data)
            .await
            .map_err(storage_app_error)?;

        let new_file = NewUploadedFile {
            filename,
            path: path.clone(),
            mime_type,
            size,
            document_type,
        };

        match self.repository.create(new_file).await {
            Ok(file) => {
                tracing::info!(file_id = file.id, path = %file.path, "File stored");
                Ok(file)
            }
            Err(e) => {
                if let Err(cleanup_err) = self.storage.delete(&path).await {
                    tracing::warn!(
                        path = %path,
                        error = %cleanup_err,
                        "Failed to remove blob after database insert failure"
                    );
                }
                Err(e)
            }
        }
    }

    pub async fn find(&self, id: i64) -> Result<Option<UploadedFile>, AppError> {
        self.repository.find_by_id(id).await
    }

    /// Fetch a record or fail with `NotFound`
    pub async fn get(&self, id: i64) -> Result<UploadedFile, AppError> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(FILE_NOT_FOUND.to_string()))
    }

    /// All records partitioned by document type, each bucket in insertion order
    pub async fn list_grouped(&self) -> Result<GroupedFiles, AppError> {
        let files = self.repository.find_all().await?;
        Ok(GroupedFiles::from_files(files))
    }

    /// Remove a file's blob, its cached thumbnail and finally its record
    #[tracing::instrument(skip(self, file), fields(file_id = file.id, path = %file.path))]
    pub async fn delete(&self, file: &UploadedFile) -> Result<(), AppError> {
        self.storage
            .delete(&file.path)
            .await
            .map_err(storage_app_error)?;

        let thumbnail = thumbnail_path(file.id);
        if let Err(e) = self.storage.delete(&thumbnail).await {
            tracing::warn!(thumbnail = %thumbnail, error = %e, "Failed to remove cached thumbnail");
        }

        if !self.repository.delete(file.id).await? {
            tracing::debug!(file_id = file.id, "Record already removed");
        }

        tracing::info!(file_id = file.id, "File deleted");
        Ok(())
    }

    /// Storage key of the file's thumbnail, generating it on first use
    pub async fn ensure_thumbnail(&self, file: &UploadedFile) -> Result<String, ThumbnailError> {
        self.thumbnails.ensure(file).await
    }
}
