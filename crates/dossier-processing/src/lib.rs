//! Dossier processing
//!
//! Upload validation that runs before ingestion, and lazy thumbnail
//! derivation for stored files.

pub mod thumbnail;
pub mod validator;

pub use thumbnail::{fit_within, thumbnail_path, ThumbnailError, ThumbnailGenerator};
pub use validator::{
    normalize_mime_type, IncomingFile, RawUpload, UploadValidator, ValidatedUpload,
    ValidationError,
};
