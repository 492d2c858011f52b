//! URLs handed to clients for playback.

use std::time::Duration;
use tubely_core::{AppError, StorageConfig, Video};
use tubely_storage::Storage;

/// Swap the stored video URL for a presigned one when the bucket is private.
///
/// Records without a stored key (never uploaded) pass through unchanged.
pub async fn signed_video(
    storage: &dyn Storage,
    settings: &StorageConfig,
    mut video: Video,
) -> Result<Video, AppError> {
    if !settings.s3_private_bucket {
        return Ok(video);
    }

    if let Some(key) = video.video_key.as_deref() {
        let url = storage
            .presigned_url(key, Duration::from_secs(settings.presign_ttl_secs))
            .await?;
        video.video_url = Some(url);
    }

    Ok(video)
}

pub async fn signed_videos(
    storage: &dyn Storage,
    settings: &StorageConfig,
    videos: Vec<Video>,
) -> Result<Vec<Video>, AppError> {
    let mut signed = Vec::with_capacity(videos.len());
    for video in videos {
        signed.push(signed_video(storage, settings, video).await?);
    }
    Ok(signed)
}
