//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::factory::create_asset_storage;
use tubely_storage::{create_storage, LocalStorage, Storage};

/// Object store for published videos, and the local assets directory for thumbnails.
pub async fn setup_storage(config: &Config) -> Result<(Arc<dyn Storage>, Arc<LocalStorage>)> {
    tracing::info!("Initializing storage...");

    let storage = create_storage(config)
        .await
        .context("Failed to initialize object storage")?;
    tracing::info!(
        backend = %storage.backend_type(),
        private_bucket = config.storage().s3_private_bucket,
        "Object storage initialized"
    );

    let assets = create_asset_storage(config)
        .await
        .context("Failed to initialize assets directory")?;
    tracing::info!(
        root = %assets.base_path().display(),
        base_url = %config.storage().assets_base_url,
        "Assets directory ready"
    );

    Ok((storage, assets))
}
