use dossier_core::{Config, DocumentType};
use std::path::Path;

const MIB: usize = 1024 * 1024;

/// Upload validation failures, in the order the rules are checked
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("The type field is required.")]
    MissingType,

    #[error("Type must be one of: passport, visa, photo.")]
    InvalidType(String),

    #[error("The file field is required.")]
    MissingFile,

    #[error("The uploaded file is empty.")]
    EmptyFile,

    #[error("The file may not be greater than {}.", format_limit(*.max))]
    FileTooLarge { size: usize, max: usize },

    #[error("Only PDF, PNG, and JPG files are allowed.")]
    InvalidExtension { extension: String },

    #[error("Only PDF, PNG, and JPG files are allowed.")]
    InvalidContentType { content_type: String },
}

impl ValidationError {
    /// Multipart field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingType | ValidationError::InvalidType(_) => "type",
            _ => "file",
        }
    }
}

fn format_limit(bytes: usize) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// File part of a multipart upload, as received
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Unchecked upload request
#[derive(Debug, Clone, Default)]
pub struct RawUpload {
    pub file: Option<IncomingFile>,
    pub document_type: Option<String>,
}

/// Upload that passed every rule and is ready for ingestion
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    /// Final path component of the client filename
    pub filename: String,
    /// Client-declared MIME type, normalized
    pub mime_type: String,
    pub document_type: DocumentType,
    pub data: Vec<u8>,
}

impl ValidatedUpload {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Normalize MIME type by stripping parameters and lowercasing
/// (e.g. "Image/JPEG; charset=utf-8" -> "image/jpeg").
pub fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase()
}

/// MIME type of the content kind recognized from the leading bytes
pub fn detect_content_type(data: &[u8]) -> Option<&'static str> {
    if data.starts_with(b"%PDF") {
        return Some("application/pdf");
    }

    match image::guess_format(data) {
        Ok(image::ImageFormat::Png) => Some("image/png"),
        Ok(image::ImageFormat::Jpeg) => Some("image/jpeg"),
        Ok(image::ImageFormat::WebP) => Some("image/webp"),
        _ => None,
    }
}

fn file_extension(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

/// Keep only the final path component of a client filename
fn base_filename(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename).trim();
    if name.is_empty() {
        "file".to_string()
    } else {
        name.to_string()
    }
}

/// Upload validator
///
/// Checks the document type, then the file: presence, size and extension.
/// The content kind is then sniffed from the bytes; it must be allowed and
/// agree with the extension. The first failing rule is reported.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl UploadValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| normalize_mime_type(&ct))
                .collect(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.max_file_size_bytes(),
            config.allowed_extensions().to_vec(),
            config.allowed_content_types().to_vec(),
        )
    }

    pub fn validate_document_type(
        &self,
        document_type: Option<&str>,
    ) -> Result<DocumentType, ValidationError> {
        let raw = document_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(ValidationError::MissingType)?;

        raw.parse::<DocumentType>()
            .map_err(|_| ValidationError::InvalidType(raw.to_string()))
    }

    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate the extension and return it lowercased
    pub fn validate_extension(&self, filename: &str) -> Result<String, ValidationError> {
        let extension = file_extension(filename);

        if extension.is_empty() || !self.allowed_extensions.contains(&extension) {
            return Err(ValidationError::InvalidExtension { extension });
        }

        Ok(extension)
    }

    /// Detect the content kind of `data` and check it against the allow-list
    pub fn validate_content(&self, data: &[u8]) -> Result<&'static str, ValidationError> {
        let detected = detect_content_type(data).ok_or_else(|| {
            ValidationError::InvalidContentType {
                content_type: "unknown".to_string(),
            }
        })?;

        if !self.allowed_content_types.iter().any(|ct| ct == detected) {
            return Err(ValidationError::InvalidContentType {
                content_type: detected.to_string(),
            });
        }

        Ok(detected)
    }

    /// Reject content whose kind contradicts the extension
    pub fn validate_extension_content_type_match(
        &self,
        extension: &str,
        content_type: &str,
    ) -> Result<(), ValidationError> {
        let expected: &[&str] = match extension {
            "jpg" | "jpeg" => &["image/jpeg"],
            "png" => &["image/png"],
            "webp" => &["image/webp"],
            "pdf" => &["application/pdf"],
            _ => {
                tracing::debug!(
                    extension = %extension,
                    content_type = %content_type,
                    "Unknown extension, skipping Content-Type/extension cross-validation"
                );
                return Ok(());
            }
        };

        if !expected.contains(&content_type) {
            return Err(ValidationError::InvalidContentType {
                content_type: content_type.to_string(),
            });
        }

        Ok(())
    }

    pub fn validate(&self, raw: RawUpload) -> Result<ValidatedUpload, ValidationError> {
        let document_type = self.validate_document_type(raw.document_type.as_deref())?;
        let file = raw.file.ok_or(ValidationError::MissingFile)?;

        self.validate_file_size(file.data.len())?;
        let filename = base_filename(&file.filename);
        let extension = self.validate_extension(&filename)?;
        let detected = self.validate_content(&file.data)?;
        self.validate_extension_content_type_match(&extension, detected)?;

        let mime_type = normalize_mime_type(&file.content_type);
        if mime_type != detected {
            tracing::debug!(
                declared = %mime_type,
                detected = detected,
                "Declared Content-Type differs from detected content"
            );
        }

        Ok(ValidatedUpload {
            filename,
            mime_type,
            document_type,
            data: file.data,
        })
    }
}
