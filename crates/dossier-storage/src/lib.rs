//! Dossier Storage Library
//!
//! Blob storage abstraction and its local filesystem implementation.
//!
//! # Storage key format
//!
//! Keys are relative, slash-separated paths:
//!
//! - **Uploads**: `uploads/{document_type}/{uuid}.{ext}`
//! - **Thumbnails**: `thumbnails/{id}.jpg`
//! - **Fallback preview**: configured, `fallbacks/pdf.png` by default
//!
//! Keys must not contain `..` or a leading `/`. Upload key generation lives in the
//! `keys` module.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{ByteStream, Storage, StorageError, StorageResult};
