//! Storage key generation and validation.

use crate::traits::{StorageError, StorageResult};
use std::path::Path;
use uuid::Uuid;

/// Generate a collision-free key under `prefix`, keeping the original file's extension.
///
/// `uploads/passport` + `Scan.JPG` produces `uploads/passport/{uuid}.jpg`.
pub fn generate_storage_key(prefix: &str, original_filename: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let name = Uuid::new_v4().simple().to_string();
    let extension = Path::new(original_filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .filter(|e| !e.is_empty() && e.chars().all(|c| c.is_ascii_alphanumeric()));

    match extension {
        Some(ext) => format!("{}/{}.{}", prefix, name, ext),
        None => format!("{}/{}", prefix, name),
    }
}

/// Reject keys that could escape the storage root.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() || storage_key.contains("..") || storage_key.starts_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key '{}' contains invalid characters",
            storage_key
        )));
    }
    Ok(())
}
