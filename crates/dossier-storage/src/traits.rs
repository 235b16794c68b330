//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Chunked blob contents
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// Storage abstraction trait
///
/// Services hold an `Arc<dyn Storage>` so tests can swap the backing directory
/// (or the backend entirely) without touching business logic.
///
/// Writes are whole-object and atomic: a reader sees either the previous object,
/// nothing, or the complete new object.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `prefix` with a generated collision-free name and return its key
    async fn upload(&self, prefix: &str, filename: &str, data: Vec<u8>) -> StorageResult<String>;

    /// Store `data` at exactly `storage_key`, replacing any existing object
    async fn upload_with_key(&self, storage_key: &str, data: Vec<u8>) -> StorageResult<()>;

    /// Download a file by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Delete a file by its storage key. Deleting a missing key succeeds.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Get the size in bytes of an object, if it exists.
    async fn content_length(&self, storage_key: &str) -> StorageResult<u64>;

    /// Copy a file from one key to another
    async fn copy(&self, from_key: &str, to_key: &str) -> StorageResult<()>;

    /// Download a file as a stream of `Bytes` chunks
    async fn download_stream(&self, storage_key: &str) -> StorageResult<ByteStream>;
}
