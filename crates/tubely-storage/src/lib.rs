//! Tubely Storage Library
//!
//! Object store abstraction for published media and its S3 and local
//! filesystem implementations.
//!
//! # Storage key format
//!
//! - **Videos**: `{aspect}/{64 hex chars}.{ext}`, e.g. `landscape/3fa9….mp4`
//! - **Thumbnail assets**: `{64 hex chars}.{ext}`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized in
//! the `keys` module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
pub use tubely_core::StorageBackend;
