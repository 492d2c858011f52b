//! Upload pipelines.
//!
//! Both pipelines run the same gates in the same order: look up the record,
//! check ownership, read the single file part, then validate size and type.
//! Nothing is staged, spawned or uploaded until every gate has passed, and
//! the record is only written after the artifact is stored.

pub mod multipart;
pub mod thumbnail;
pub mod video;

pub use multipart::{read_file_field, UploadedFile};
pub use thumbnail::{ThumbnailUploadPipeline, ThumbnailView};
pub use video::VideoUploadPipeline;

use tubely_core::{AppError, Video};
use tubely_db::VideoRepository;
use uuid::Uuid;

/// Load the target record and check the caller owns it.
pub(crate) async fn load_owned_video(
    videos: &dyn VideoRepository,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<Video, AppError> {
    let video = videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(user_id) {
        tracing::warn!(
            video_id = %video_id,
            user_id = %user_id,
            owner_id = %video.user_id,
            "Upload attempted by non-owner"
        );
        return Err(AppError::Forbidden(
            "You are not the owner of this video".to_string(),
        ));
    }

    Ok(video)
}
