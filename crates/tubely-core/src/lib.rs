//! Tubely Core Library
//!
//! Domain models, error types, configuration and constants shared by every
//! Tubely crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, MediaConfig, StorageConfig, TubelyConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{AspectRatio, UploadKind, Video};
pub use storage_types::StorageBackend;
