use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Kind of identity document a file was uploaded as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "document_type", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Passport,
    Visa,
    Photo,
}

impl DocumentType {
    /// Every document type, in the order groups are presented
    pub const ALL: [DocumentType; 3] = [
        DocumentType::Passport,
        DocumentType::Visa,
        DocumentType::Photo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Passport => "passport",
            DocumentType::Visa => "visa",
            DocumentType::Photo => "photo",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "passport" => Ok(DocumentType::Passport),
            "visa" => Ok(DocumentType::Visa),
            "photo" => Ok(DocumentType::Photo),
            _ => Err(anyhow::anyhow!("Invalid document type: {}", s)),
        }
    }
}

/// Persisted metadata for one uploaded blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct UploadedFile {
    pub id: i64,
    /// Name supplied by the client
    pub filename: String,
    /// Storage key of the blob
    pub path: String,
    pub mime_type: String,
    pub size: i64,
    pub document_type: DocumentType,
    pub created_at: DateTime<Utc>,
}

impl UploadedFile {
    /// Lowercased extension of the client filename, if any
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }
}

/// Insert payload for a new record
#[derive(Debug, Clone, PartialEq)]
pub struct NewUploadedFile {
    pub filename: String,
    pub path: String,
    pub mime_type: String,
    pub size: i64,
    pub document_type: DocumentType,
}

/// Public URL of a record's preview endpoint
pub fn preview_url_for(public_base_url: &str, id: i64) -> String {
    format!(
        "{}/api/files/{}/preview",
        public_base_url.trim_end_matches('/'),
        id
    )
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadedFileResponse {
    pub id: i64,
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    /// Upload time, `YYYY-MM-DD HH:MM:SS` in UTC
    #[schema(example = "2025-01-31 14:05:09")]
    pub uploaded_at: String,
    pub preview_url: String,
}

impl UploadedFileResponse {
    pub fn new(file: UploadedFile, public_base_url: &str) -> Self {
        Self {
            preview_url: preview_url_for(public_base_url, file.id),
            uploaded_at: file.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            id: file.id,
            filename: file.filename,
            mime_type: file.mime_type,
            size: file.size,
            document_type: file.document_type,
        }
    }
}

/// Records partitioned by document type; every bucket is always present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedFiles<T = UploadedFile> {
    pub passport: Vec<T>,
    pub visa: Vec<T>,
    pub photo: Vec<T>,
}

impl<T> Default for GroupedFiles<T> {
    fn default() -> Self {
        Self {
            passport: Vec::new(),
            visa: Vec::new(),
            photo: Vec::new(),
        }
    }
}

impl<T> GroupedFiles<T> {
    pub fn get(&self, document_type: DocumentType) -> &[T] {
        match document_type {
            DocumentType::Passport => &self.passport,
            DocumentType::Visa => &self.visa,
            DocumentType::Photo => &self.photo,
        }
    }

    fn bucket_mut(&mut self, document_type: DocumentType) -> &mut Vec<T> {
        match document_type {
            DocumentType::Passport => &mut self.passport,
            DocumentType::Visa => &mut self.visa,
            DocumentType::Photo => &mut self.photo,
        }
    }

    pub fn len(&self) -> usize {
        self.passport.len() + self.visa.len() + self.photo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> GroupedFiles<U> {
        GroupedFiles {
            passport: self.passport.into_iter().map(&mut f).collect(),
            visa: self.visa.into_iter().map(&mut f).collect(),
            photo: self.photo.into_iter().map(&mut f).collect(),
        }
    }
}

impl GroupedFiles<UploadedFile> {
    /// Partition records by type, keeping their relative order
    pub fn from_files(files: impl IntoIterator<Item = UploadedFile>) -> Self {
        let mut groups = Self::default();
        for file in files {
            groups.bucket_mut(file.document_type).push(file);
        }
        groups
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GroupedFilesResponse {
    pub passport: Vec<UploadedFileResponse>,
    pub visa: Vec<UploadedFileResponse>,
    pub photo: Vec<UploadedFileResponse>,
}

impl From<GroupedFiles<UploadedFileResponse>> for GroupedFilesResponse {
    fn from(groups: GroupedFiles<UploadedFileResponse>) -> Self {
        Self {
            passport: groups.passport,
            visa: groups.visa,
            photo: groups.photo,
        }
    }
}
