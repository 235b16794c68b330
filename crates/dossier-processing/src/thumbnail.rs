//! Lazy thumbnail derivation
//!
//! Thumbnails live at `thumbnails/<id>.jpg`. Raster originals are decoded,
//! scaled to fit a square box and re-encoded as JPEG; PDFs get a copy of a
//! fixed fallback image. Derivation happens on first preview and the result is
//! reused afterwards.

use dossier_core::{Config, UploadedFile};
use dossier_storage::{Storage, StorageError};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, ImageError, ImageReader};
use std::io::Cursor;
use std::sync::Arc;
use std::time::Instant;

const JPEG_QUALITY: u8 = 85;

#[derive(Debug, thiserror::Error)]
pub enum ThumbnailError {
    #[error("Original file missing: {0}")]
    OriginalMissing(String),

    #[error("No thumbnail strategy for extension '{0}'")]
    UnsupportedExtension(String),

    #[error("Fallback image missing: {0}")]
    FallbackMissing(String),

    #[error("Failed to decode image: {0}")]
    Decode(#[source] ImageError),

    #[error("Failed to encode thumbnail: {0}")]
    Encode(#[source] ImageError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Thumbnail task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Storage key of the thumbnail for a record
pub fn thumbnail_path(id: i64) -> String {
    format!("thumbnails/{}.jpg", id)
}

/// Dimensions that fit `width`x`height` inside a `max`x`max` box.
///
/// Keeps the aspect ratio without upscaling; each side is at least 1px.
pub fn fit_within(width: u32, height: u32, max: u32) -> (u32, u32) {
    let max = max.max(1);
    if width <= max && height <= max {
        return (width.max(1), height.max(1));
    }

    let scale = f64::min(max as f64 / width as f64, max as f64 / height as f64);
    let w = ((width as f64 * scale).round() as u32).clamp(1, max);
    let h = ((height as f64 * scale).round() as u32).clamp(1, max);
    (w, h)
}

/// Decode, downscale and JPEG-encode an image. CPU-bound.
fn render_thumbnail(data: &[u8], max_dimension: u32) -> Result<Vec<u8>, ThumbnailError> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ThumbnailError::Decode(ImageError::IoError(e)))?
        .decode()
        .map_err(ThumbnailError::Decode)?;

    let (width, height) = img.dimensions();
    let (target_width, target_height) = fit_within(width, height, max_dimension);
    let img = if (target_width, target_height) == (width, height) {
        img
    } else {
        img.resize_exact(target_width, target_height, FilterType::Lanczos3)
    };

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    img.to_rgb8()
        .write_with_encoder(encoder)
        .map_err(ThumbnailError::Encode)?;

    Ok(out)
}

/// Derives and caches thumbnails in the blob store
#[derive(Clone)]
pub struct ThumbnailGenerator {
    storage: Arc<dyn Storage>,
    fallback_key: String,
    max_dimension: u32,
}

impl ThumbnailGenerator {
    pub fn new(storage: Arc<dyn Storage>, fallback_key: impl Into<String>, max_dimension: u32) -> Self {
        Self {
            storage,
            fallback_key: fallback_key.into(),
            max_dimension,
        }
    }

    pub fn from_config(storage: Arc<dyn Storage>, config: &Config) -> Self {
        Self::new(
            storage,
            config.fallback_image_key(),
            config.thumbnail_size(),
        )
    }

    /// Return the thumbnail key, generating the thumbnail if it does not exist yet
    pub async fn ensure(&self, file: &UploadedFile) -> Result<String, ThumbnailError> {
        let path = thumbnail_path(file.id);
        if self.storage.exists(&path).await? {
            tracing::debug!(file_id = file.id, thumbnail = %path, "Thumbnail cache hit");
            return Ok(path);
        }

        self.generate(file).await
    }

    /// Generate (or regenerate) the thumbnail for a record and return its key.
    ///
    /// Nothing is written on failure.
    pub async fn generate(&self, file: &UploadedFile) -> Result<String, ThumbnailError> {
        let start = Instant::now();
        let result = self.derive(file).await;

        match &result {
            Ok(path) => tracing::info!(
                file_id = file.id,
                thumbnail = %path,
                duration_ms = start.elapsed().as_millis() as u64,
                "Thumbnail generated"
            ),
            Err(e) => tracing::error!(
                file_id = file.id,
                filename = %file.filename,
                path = %file.path,
                error = %e,
                "Thumbnail generation failed"
            ),
        }

        result
    }

    async fn derive(&self, file: &UploadedFile) -> Result<String, ThumbnailError> {
        let extension = file.extension().unwrap_or_default();
        let path = thumbnail_path(file.id);

        if !self.storage.exists(&file.path).await? {
            return Err(ThumbnailError::OriginalMissing(file.path.clone()));
        }

        match extension.as_str() {
            "jpg" | "jpeg" | "png" | "webp" => {
                let data = self.storage.download(&file.path).await.map_err(|e| match e {
                    StorageError::NotFound(key) => ThumbnailError::OriginalMissing(key),
                    other => ThumbnailError::Storage(other),
                })?;

                let max_dimension = self.max_dimension;
                let jpeg =
                    tokio::task::spawn_blocking(move || render_thumbnail(&data, max_dimension))
                        .await??;

                self.storage.upload_with_key(&path, jpeg).await?;
            }
            "pdf" => {
                self.storage
                    .copy(&self.fallback_key, &path)
                    .await
                    .map_err(|e| match e {
                        StorageError::NotFound(key) => ThumbnailError::FallbackMissing(key),
                        other => ThumbnailError::Storage(other),
                    })?;
            }
            _ => return Err(ThumbnailError::UnsupportedExtension(extension)),
        }

        Ok(path)
    }
}
