//! Video upload: validate, stage, probe, normalize, publish, persist.

use super::{load_owned_video, read_file_field};
use crate::state::{AppState, MediaState};
use axum::extract::Multipart;
use std::sync::Arc;
use std::time::Instant;
use tubely_core::{AppError, UploadKind, Video};
use tubely_db::VideoRepository;
use tubely_processing::validator::extension_for;
use tubely_processing::{processed_path_for, StagedFile, UploadValidator, VideoMetadata};
use tubely_storage::{keys, Storage};
use uuid::Uuid;

/// Where a processed video ended up.
#[derive(Debug)]
struct Published {
    key: String,
    url: String,
    metadata: VideoMetadata,
}

pub struct VideoUploadPipeline {
    videos: Arc<dyn VideoRepository>,
    storage: Arc<dyn Storage>,
    media: MediaState,
    validator: UploadValidator,
}

impl VideoUploadPipeline {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        storage: Arc<dyn Storage>,
        media: MediaState,
        validator: UploadValidator,
    ) -> Self {
        Self {
            videos,
            storage,
            media,
            validator,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        let media_config = state.config.media();
        Self::new(
            state.videos.clone(),
            state.storage.clone(),
            state.media.clone(),
            UploadValidator::new(
                UploadKind::Video,
                media_config.max_video_size_bytes,
                media_config.verify_content_signature,
            ),
        )
    }

    /// Run the whole pipeline for `video_id` on behalf of `user_id`.
    ///
    /// On success the record carries the new video URL. On any failure the
    /// record is untouched and no staged file is left on disk.
    #[tracing::instrument(skip_all, fields(video_id = %video_id, user_id = %user_id))]
    pub async fn run(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        mut multipart: Multipart,
    ) -> Result<Video, AppError> {
        let start = Instant::now();

        let mut video = load_owned_video(self.videos.as_ref(), video_id, user_id).await?;

        let file = read_file_field(&mut multipart, &self.validator).await?;
        let content_type = self.validator.validate(&file.data, &file.content_type)?;
        let extension = extension_for(&content_type)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid file type: {}", content_type)))?;

        tracing::info!(
            file_name = %file.file_name,
            size_bytes = file.size(),
            content_type = %content_type,
            "Video upload accepted"
        );

        let staged = self.media.staging.stage(&file.data, extension).await?;
        drop(file);

        let outcome = self.process(&staged, extension, &content_type).await;
        staged.cleanup().await;
        let published = outcome?;

        video.video_url = Some(published.url);
        video.video_key = Some(published.key.clone());
        let video = match self.videos.update(&video).await {
            Ok(video) => video,
            Err(e) => {
                self.discard_published(&published.key).await;
                return Err(e);
            }
        };

        tracing::info!(
            aspect = %published.metadata.aspect,
            width = published.metadata.width,
            height = published.metadata.height,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video upload complete"
        );

        Ok(video)
    }

    /// Probe, normalize and publish a staged file. The normalized output is
    /// removed before returning, whatever the outcome.
    async fn process(
        &self,
        staged: &StagedFile,
        extension: &str,
        content_type: &str,
    ) -> Result<Published, AppError> {
        let metadata = self.media.prober.probe(staged.path()).await?;
        tracing::debug!(
            width = metadata.width,
            height = metadata.height,
            aspect = %metadata.aspect,
            "Probed staged video"
        );

        let processed = match self.media.normalizer.normalize(staged.path()).await {
            Ok(processed) => processed,
            Err(e) => {
                // A failed run can leave partial output next to the input.
                StagedFile::adopt(processed_path_for(staged.path()))
                    .cleanup()
                    .await;
                return Err(e.into());
            }
        };
        let outcome = self
            .publish(&processed, metadata, extension, content_type)
            .await;
        processed.cleanup().await;
        outcome
    }

    async fn publish(
        &self,
        processed: &StagedFile,
        metadata: VideoMetadata,
        extension: &str,
        content_type: &str,
    ) -> Result<Published, AppError> {
        let key = keys::video_key(metadata.aspect, extension);

        let url = self
            .storage
            .put_file(&key, processed.path(), content_type)
            .await?;

        Ok(Published { key, url, metadata })
    }

    /// Best effort: nothing references the object once the record update failed.
    async fn discard_published(&self, key: &str) {
        if let Err(e) = self.storage.delete(key).await {
            tracing::warn!(key = %key, error = %e, "Failed to remove unreferenced video object");
        }
    }
}
