//! Database repositories for data access layer
//
// Uploaded file records
pub mod file;
//
// In-memory implementation for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;

pub use file::{create_file_repository, FileRepository, PostgresFileRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryFileRepository;
