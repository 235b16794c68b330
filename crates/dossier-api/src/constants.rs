//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Cache policy for thumbnails; ids are never reused so a thumbnail never changes
pub const THUMBNAIL_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Multipart framing allowance on top of the maximum file size
pub const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub const FILE_NOT_FOUND: &str = "File not found.";
