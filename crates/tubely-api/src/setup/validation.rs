//! Configuration validation
//!
//! Fails fast at startup on settings that would only surface as broken
//! uploads later.

use anyhow::Result;
use tubely_core::{Config, StorageBackend};

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    let storage = config.storage();

    if config.is_production() && storage.backend == StorageBackend::Local {
        tracing::warn!("Local object storage in production - published videos live on this host only");
    }

    if storage.backend == StorageBackend::S3 && storage.s3_region.is_none() {
        return Err(anyhow::anyhow!(
            "S3_REGION or AWS_REGION must be set when using the S3 storage backend"
        ));
    }

    if storage.s3_private_bucket {
        if storage.backend != StorageBackend::S3 {
            tracing::warn!("S3_PRIVATE_BUCKET has no effect without the S3 storage backend");
        }
        if storage.presign_ttl_secs == 0 {
            return Err(anyhow::anyhow!("PRESIGN_TTL_SECS cannot be 0"));
        }
    }

    if !storage.assets_base_url.starts_with("http://")
        && !storage.assets_base_url.starts_with("https://")
    {
        return Err(anyhow::anyhow!(
            "ASSETS_BASE_URL must be an absolute http(s) URL"
        ));
    }

    Ok(())
}
