//! Blob store setup and fallback image seeding

use anyhow::{Context, Result};
use dossier_core::Config;
use dossier_storage::{create_storage, Storage};
use std::sync::Arc;

/// Create the blob store and make sure the PDF preview fallback is in place
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage")?;
    seed_fallback_image(storage.as_ref(), config).await?;
    Ok(storage)
}

/// Copy `FALLBACK_IMAGE_SEED_PATH` into storage when the fallback key is absent.
///
/// A missing fallback is not fatal; PDF previews fail until it is provided.
pub async fn seed_fallback_image(storage: &dyn Storage, config: &Config) -> Result<()> {
    let key = config.fallback_image_key();

    if storage.exists(key).await? {
        tracing::debug!(key = %key, "Fallback image present");
        return Ok(());
    }

    if let Some(seed_path) = config.fallback_image_seed_path() {
        let data = tokio::fs::read(seed_path)
            .await
            .with_context(|| format!("Failed to read fallback image seed at {}", seed_path))?;
        storage
            .upload_with_key(key, data)
            .await
            .context("Failed to store fallback image")?;
        tracing::info!(key = %key, seed_path = %seed_path, "Fallback image seeded");
        return Ok(());
    }

    tracing::warn!(
        key = %key,
        "Fallback image missing; PDF previews will fail until it is provided"
    );
    Ok(())
}
