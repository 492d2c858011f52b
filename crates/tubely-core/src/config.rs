//! Configuration module
//!
//! Settings are read from the process environment (after loading an optional
//! `.env` file). Parsing goes through [`Config::from_lookup`] so callers can
//! supply values from any source.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{MAX_THUMBNAIL_UPLOAD_BYTES, MAX_VIDEO_UPLOAD_BYTES};
use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const PRESIGN_TTL_SECS: u64 = 3600;
const MEDIA_COMMAND_TIMEOUT_SECS: u64 = 300;
const MIN_JWT_SECRET_LEN: usize = 32;
const HTTP_CONCURRENCY_LIMIT: usize = 256;

/// Server-wide settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    /// Requests served at once; the rest wait for a slot.
    pub http_concurrency_limit: usize,
    pub jwt_secret: String,
    /// `compact` or `json`
    pub log_format: String,
}

/// Where published videos and thumbnail assets live
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    /// Overrides the bucket URL in published links, e.g. a CDN distribution.
    pub s3_public_base_url: Option<String>,
    /// When set, read endpoints hand out presigned URLs instead of public ones.
    pub s3_private_bucket: bool,
    pub presign_ttl_secs: u64,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub assets_root: PathBuf,
    pub assets_base_url: String,
}

/// Upload limits and external tool settings
#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub staging_dir: PathBuf,
    pub ffprobe_path: String,
    pub ffmpeg_path: String,
    pub command_timeout_secs: u64,
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
    pub verify_content_signature: bool,
}

#[derive(Clone, Debug)]
pub struct TubelyConfig {
    pub base: BaseConfig,
    pub database_url: String,
    pub storage: StorageConfig,
    pub media: MediaConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<TubelyConfig>);

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let base = BaseConfig {
            server_port,
            environment,
            cors_origins,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: parse_or(&lookup, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            http_concurrency_limit: parse_or(
                &lookup,
                "HTTP_CONCURRENCY_LIMIT",
                HTTP_CONCURRENCY_LIMIT,
            ),
            jwt_secret: lookup("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            log_format: lookup("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .to_lowercase(),
        };

        let backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse::<StorageBackend>()?,
            None => StorageBackend::S3,
        };

        let storage = StorageConfig {
            backend,
            s3_bucket: lookup("S3_BUCKET"),
            s3_region: lookup("S3_REGION").or_else(|| lookup("AWS_REGION")),
            s3_endpoint: lookup("S3_ENDPOINT"),
            s3_public_base_url: lookup("S3_PUBLIC_BASE_URL"),
            s3_private_bucket: parse_bool(&lookup, "S3_PRIVATE_BUCKET", false),
            presign_ttl_secs: parse_or(&lookup, "PRESIGN_TTL_SECS", PRESIGN_TTL_SECS),
            local_storage_path: lookup("LOCAL_STORAGE_PATH"),
            local_storage_base_url: lookup("LOCAL_STORAGE_BASE_URL"),
            assets_root: lookup("ASSETS_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./assets")),
            assets_base_url: lookup("ASSETS_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}/assets", server_port))
                .trim_end_matches('/')
                .to_string(),
        };

        let media = MediaConfig {
            staging_dir: lookup("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            ffprobe_path: lookup("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
            ffmpeg_path: lookup("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            command_timeout_secs: parse_or(
                &lookup,
                "MEDIA_COMMAND_TIMEOUT_SECS",
                MEDIA_COMMAND_TIMEOUT_SECS,
            ),
            max_video_size_bytes: size_mb_or(
                &lookup,
                "MAX_VIDEO_SIZE_MB",
                MAX_VIDEO_UPLOAD_BYTES,
            ),
            max_thumbnail_size_bytes: size_mb_or(
                &lookup,
                "MAX_THUMBNAIL_SIZE_MB",
                MAX_THUMBNAIL_UPLOAD_BYTES,
            ),
            verify_content_signature: parse_bool(&lookup, "VERIFY_CONTENT_SIGNATURE", true),
        };

        let config = TubelyConfig {
            base,
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            storage,
            media,
        };

        Ok(Config(Box::new(config)))
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        matches!(
            self.0.base.environment.to_lowercase().as_str(),
            "production" | "prod"
        )
    }

    /// Reject combinations that would only fail later at request time.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.0.base.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if !self.0.database_url.starts_with("postgres://")
            && !self.0.database_url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.is_production() && self.0.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        match self.0.storage.backend {
            StorageBackend::S3 => {
                if self.0.storage.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!("S3_BUCKET is required for the s3 backend"));
                }
            }
            StorageBackend::Local => {
                if self.0.storage.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH is required for the local backend"
                    ));
                }
            }
        }

        if self.0.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!(
                "HTTP_CONCURRENCY_LIMIT must be greater than zero"
            ));
        }

        if self.0.media.command_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "MEDIA_COMMAND_TIMEOUT_SECS must be greater than zero"
            ));
        }

        if self.0.media.max_video_size_bytes == 0 || self.0.media.max_thumbnail_size_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be greater than zero"));
        }

        Ok(())
    }

    pub fn server_port(&self) -> u16 {
        self.0.base.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.0.base.jwt_secret
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.0.base.cors_origins
    }

    pub fn log_format(&self) -> &str {
        &self.0.base.log_format
    }

    pub fn database_url(&self) -> &str {
        &self.0.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.0.base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.0.base.db_timeout_seconds
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.0.base.http_concurrency_limit
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.0.storage
    }

    pub fn media(&self) -> &MediaConfig {
        &self.0.media
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.0.media.max_video_size_bytes
    }

    pub fn max_thumbnail_size_bytes(&self) -> usize {
        self.0.media.max_thumbnail_size_bytes
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> bool {
    lookup(key)
        .and_then(|value| value.trim().to_lowercase().parse().ok())
        .unwrap_or(default)
}

fn size_mb_or(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default_bytes: usize,
) -> usize {
    lookup(key)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .map(|mb| mb * 1024 * 1024)
        .unwrap_or(default_bytes)
}
