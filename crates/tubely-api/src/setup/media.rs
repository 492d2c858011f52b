//! External tool and staging setup

use crate::state::MediaState;
use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_processing::{FastStartNormalizer, FfprobeProber, StagingArea, ToolRunner};

pub async fn setup_media(config: &Config) -> Result<MediaState> {
    let media = config.media();

    tokio::fs::create_dir_all(&media.staging_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create staging directory {}",
                media.staging_dir.display()
            )
        })?;

    let runner = ToolRunner::from_secs(media.command_timeout_secs);

    // A missing binary only fails uploads, not startup.
    for tool in [&media.ffprobe_path, &media.ffmpeg_path] {
        if let Err(e) = runner.run(tool, ["-version"]).await {
            tracing::warn!(tool = %tool, error = %e, "Media tool unavailable, video uploads will fail");
        }
    }

    tracing::info!(
        staging_dir = %media.staging_dir.display(),
        ffprobe = %media.ffprobe_path,
        ffmpeg = %media.ffmpeg_path,
        timeout_secs = media.command_timeout_secs,
        "Media tools configured"
    );

    Ok(MediaState {
        prober: Arc::new(FfprobeProber::new(media.ffprobe_path.clone(), runner.clone())),
        normalizer: Arc::new(FastStartNormalizer::new(media.ffmpeg_path.clone(), runner)),
        staging: StagingArea::new(media.staging_dir.clone()),
    })
}
