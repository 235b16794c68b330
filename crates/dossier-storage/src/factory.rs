use crate::{LocalStorage, Storage, StorageResult};
use dossier_core::Config;
use std::sync::Arc;

/// Create the blob store described by configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.storage_path()).await?;
    tracing::info!(
        base_path = %storage.base_path().display(),
        "Local storage initialized"
    );
    Ok(Arc::new(storage))
}
