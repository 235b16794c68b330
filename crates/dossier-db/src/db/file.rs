use dossier_core::models::{NewUploadedFile, UploadedFile};
use dossier_core::AppError;
use sqlx::{PgPool, Postgres};
use std::sync::Arc;

const SELECT_COLUMNS: &str = "id, filename, path, mime_type, size, document_type, created_at";

/// Trait for uploaded-file record operations
/// This abstracts the database implementation so services can run against PostgreSQL
/// in production and an in-memory store in tests.
#[async_trait::async_trait]
pub trait FileRepository: Send + Sync {
    /// Persist a new record and return it with its assigned id and timestamp
    async fn create(&self, file: NewUploadedFile) -> Result<UploadedFile, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<UploadedFile>, AppError>;

    /// All records in insertion order
    async fn find_all(&self) -> Result<Vec<UploadedFile>, AppError>;

    /// Remove a record; returns false when no row matched
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Cheap round-trip used by readiness probes
    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PostgresFileRepository {
    pool: PgPool,
}

impl PostgresFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FileRepository for PostgresFileRepository {
    #[tracing::instrument(skip(self, file), fields(
        db.system = "postgresql",
        db.table = "uploaded_files",
        db.operation = "insert",
        document_type = %file.document_type
    ))]
    async fn create(&self, file: NewUploadedFile) -> Result<UploadedFile, AppError> {
        let query = format!(
            r#"
            INSERT INTO uploaded_files (filename, path, mime_type, size, document_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        );

        let record = sqlx::query_as::<Postgres, UploadedFile>(&query)
            .bind(&file.filename)
            .bind(&file.path)
            .bind(&file.mime_type)
            .bind(file.size)
            .bind(file.document_type)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(file_id = record.id, path = %record.path, "Uploaded file record created");

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploaded_files", db.operation = "select"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<UploadedFile>, AppError> {
        let query = format!("SELECT {} FROM uploaded_files WHERE id = $1", SELECT_COLUMNS);

        let record = sqlx::query_as::<Postgres, UploadedFile>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploaded_files", db.operation = "select"))]
    async fn find_all(&self) -> Result<Vec<UploadedFile>, AppError> {
        let query = format!("SELECT {} FROM uploaded_files ORDER BY id ASC", SELECT_COLUMNS);

        let records = sqlx::query_as::<Postgres, UploadedFile>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    #[tracing::instrument(skip(self), fields(db.table = "uploaded_files", db.operation = "delete"))]
    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM uploaded_files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Factory function to create the file repository
pub fn create_file_repository(pool: PgPool) -> Arc<dyn FileRepository> {
    tracing::info!("Initializing PostgreSQL file repository");
    Arc::new(PostgresFileRepository::new(pool))
}
