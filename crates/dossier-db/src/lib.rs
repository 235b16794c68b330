//! Dossier database layer
//!
//! Repository trait for uploaded-file records, its PostgreSQL implementation and,
//! behind the `test-utils` feature, an in-memory implementation.

pub mod db;

pub use db::{create_file_repository, FileRepository, PostgresFileRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use db::InMemoryFileRepository;
