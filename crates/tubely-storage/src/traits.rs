//! Storage abstraction trait

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tubely_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => AppError::NotFound(format!("File not found: {}", key)),
            StorageError::InvalidKey(msg) => AppError::BadRequest(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Object store for published media.
///
/// Objects are immutable: a new upload always writes a new key. Callers pick
/// keys through [`crate::keys`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` at `key` and return its public URL.
    async fn put_object(&self, key: &str, data: Bytes, content_type: &str)
        -> StorageResult<String>;

    /// Store the local file at `path` under `key` without loading it into
    /// memory, and return its public URL.
    async fn put_file(&self, key: &str, path: &Path, content_type: &str) -> StorageResult<String>;

    /// Read a whole object.
    async fn get_object(&self, key: &str) -> StorageResult<Bytes>;

    /// Delete an object. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Public URL an object is reachable at.
    fn public_url(&self, key: &str) -> String;

    /// Inverse of [`Storage::public_url`]. `None` when the URL does not point
    /// into this store.
    fn key_from_url(&self, url: &str) -> Option<String>;

    /// Time-limited URL for direct GET access to a private object.
    async fn presigned_url(&self, key: &str, expires_in: Duration) -> StorageResult<String>;

    fn backend_type(&self) -> StorageBackend;
}

/// Strip `base` plus a separating slash from `url`, validating what remains.
pub(crate) fn strip_base_url(base: &str, url: &str) -> Option<String> {
    let key = url
        .strip_prefix(base.trim_end_matches('/'))?
        .strip_prefix('/')?;
    crate::keys::is_valid_key(key).then(|| key.to_string())
}
