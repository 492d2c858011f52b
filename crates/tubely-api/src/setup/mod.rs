//! Application setup and initialization

pub mod database;
pub mod media;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::auth::JwtService;
use crate::state::AppState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::PgVideoRepository;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    validation::validate_config(&config).context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format())
        .context("Failed to initialize telemetry")?;

    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;

    let (storage, assets) = storage::setup_storage(&config).await?;

    let media = media::setup_media(&config).await?;

    let state = Arc::new(AppState {
        jwt: Arc::new(JwtService::new(config.jwt_secret())),
        videos: Arc::new(PgVideoRepository::new(pool)),
        storage,
        assets,
        media,
        config,
    });

    let router = routes::setup_routes(state.clone())?;

    Ok((state, router))
}
