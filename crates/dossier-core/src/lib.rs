//! Dossier Core Library
//!
//! Domain models, error types and configuration shared by every Dossier crate.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{DocumentType, GroupedFiles, NewUploadedFile, UploadedFile};
