use super::file::FileRepository;
use chrono::Utc;
use dossier_core::models::{NewUploadedFile, UploadedFile};
use dossier_core::AppError;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::RwLock;

/// In-memory `FileRepository` with serial ids, for tests
#[derive(Default)]
pub struct InMemoryFileRepository {
    records: RwLock<BTreeMap<i64, UploadedFile>>,
    last_id: AtomicI64,
    fail_inserts: AtomicBool,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `create` fail with a database error
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn create(&self, file: NewUploadedFile) -> Result<UploadedFile, AppError> {
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolClosed));
        }

        let mut records = self.records.write().await;
        if records.values().any(|r| r.path == file.path) {
            return Err(AppError::Database(sqlx::Error::Protocol(format!(
                "duplicate path {}",
                file.path
            ))));
        }

        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = UploadedFile {
            id,
            filename: file.filename,
            path: file.path,
            mime_type: file.mime_type,
            size: file.size,
            document_type: file.document_type,
            created_at: Utc::now(),
        };
        records.insert(id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<UploadedFile>, AppError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<UploadedFile>, AppError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.records.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
