//! Store and repository doubles that fail on write.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use std::time::Duration;
use tubely_core::models::CreateVideoRequest;
use tubely_core::{AppError, Video};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_storage::{LocalStorage, Storage, StorageBackend, StorageError, StorageResult};
use uuid::Uuid;

/// Object store whose uploads always fail; reads go to `inner`.
pub struct FailingStorage {
    inner: LocalStorage,
}

impl FailingStorage {
    pub fn new(inner: LocalStorage) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn put_object(&self, key: &str, _data: Bytes, _ct: &str) -> StorageResult<String> {
        Err(StorageError::UploadFailed(format!("bucket unreachable for {}", key)))
    }

    async fn put_file(&self, key: &str, _path: &Path, _ct: &str) -> StorageResult<String> {
        Err(StorageError::UploadFailed(format!("bucket unreachable for {}", key)))
    }

    async fn get_object(&self, key: &str) -> StorageResult<Bytes> {
        self.inner.get_object(key).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.inner.exists(key).await
    }

    fn public_url(&self, key: &str) -> String {
        self.inner.public_url(key)
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        self.inner.key_from_url(url)
    }

    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String> {
        self.inner.presigned_url(key, expires_in).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

/// Record store that reads normally but cannot persist updates, as when the
/// database goes away mid-request.
pub struct FailingUpdates {
    inner: InMemoryVideoRepository,
}

impl FailingUpdates {
    pub fn new(inner: InMemoryVideoRepository) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl VideoRepository for FailingUpdates {
    async fn create(&self, user_id: Uuid, request: CreateVideoRequest) -> Result<Video, AppError> {
        self.inner.create(user_id, request).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        self.inner.get(id).await
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        self.inner.list_for_user(user_id).await
    }

    async fn update(&self, _video: &Video) -> Result<Video, AppError> {
        Err(AppError::Database(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.inner.ping().await
    }
}
