//! Thumbnail upload and retrieval.
//!
//! Thumbnails are written to the assets directory under a random name and
//! served back from there; the record stores the public asset URL.

use super::{load_owned_video, read_file_field};
use crate::state::AppState;
use axum::extract::Multipart;
use bytes::Bytes;
use std::sync::Arc;
use tubely_core::{AppError, UploadKind, Video};
use tubely_db::VideoRepository;
use tubely_processing::validator::{content_type_for_extension, extension_for};
use tubely_processing::UploadValidator;
use tubely_storage::{keys, LocalStorage, Storage};
use uuid::Uuid;

/// Thumbnail bytes ready to be served.
#[derive(Debug)]
pub struct ThumbnailView {
    pub data: Bytes,
    pub content_type: &'static str,
}

pub struct ThumbnailUploadPipeline {
    videos: Arc<dyn VideoRepository>,
    assets: Arc<LocalStorage>,
    validator: UploadValidator,
}

impl ThumbnailUploadPipeline {
    pub fn new(
        videos: Arc<dyn VideoRepository>,
        assets: Arc<LocalStorage>,
        validator: UploadValidator,
    ) -> Self {
        Self {
            videos,
            assets,
            validator,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        let media_config = state.config.media();
        Self::new(
            state.videos.clone(),
            state.assets.clone(),
            UploadValidator::new(
                UploadKind::Thumbnail,
                media_config.max_thumbnail_size_bytes,
                media_config.verify_content_signature,
            ),
        )
    }

    #[tracing::instrument(skip_all, fields(video_id = %video_id, user_id = %user_id))]
    pub async fn run(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        mut multipart: Multipart,
    ) -> Result<Video, AppError> {
        let mut video = load_owned_video(self.videos.as_ref(), video_id, user_id).await?;

        let file = read_file_field(&mut multipart, &self.validator).await?;
        let content_type = self.validator.validate(&file.data, &file.content_type)?;
        let extension = extension_for(&content_type)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid file type: {}", content_type)))?;

        let key = keys::asset_key(extension);
        let size = file.size();
        let url = self
            .assets
            .put_object(&key, file.data, &content_type)
            .await?;

        let replaced = video.thumbnail_url.replace(url);
        let video = match self.videos.update(&video).await {
            Ok(video) => video,
            Err(e) => {
                if let Err(delete_err) = self.assets.delete(&key).await {
                    tracing::warn!(key = %key, error = %delete_err, "Failed to remove unreferenced thumbnail");
                }
                return Err(e);
            }
        };

        tracing::info!(key = %key, size_bytes = size, "Thumbnail stored");

        if let Some(old_url) = replaced {
            self.remove_replaced(&old_url).await;
        }

        Ok(video)
    }

    /// Best effort: the record already points at the new asset.
    async fn remove_replaced(&self, old_url: &str) {
        let Some(old_key) = self.assets.key_from_url(old_url) else {
            return;
        };
        if let Err(e) = self.assets.delete(&old_key).await {
            tracing::warn!(key = %old_key, error = %e, "Failed to remove replaced thumbnail");
        }
    }
}

/// Resolve a record's thumbnail back to its asset and read it.
pub async fn load_thumbnail(
    videos: &dyn VideoRepository,
    assets: &LocalStorage,
    video_id: Uuid,
) -> Result<ThumbnailView, AppError> {
    let video = videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    let not_found = || AppError::NotFound("Thumbnail not found".to_string());

    let url = video.thumbnail_url.as_deref().ok_or_else(not_found)?;
    let key = assets.key_from_url(url).ok_or_else(not_found)?;

    let data = assets.get_object(&key).await?;

    Ok(ThumbnailView {
        data,
        content_type: asset_content_type(&key),
    })
}

/// Content type for an asset key, from its extension.
pub fn asset_content_type(key: &str) -> &'static str {
    key.rsplit_once('.')
        .and_then(|(_, extension)| content_type_for_extension(extension))
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_db::InMemoryVideoRepository;

    async fn assets() -> (tempfile::TempDir, LocalStorage) {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "http://localhost:8091/assets".to_string())
            .await
            .unwrap();
        (dir, storage)
    }

    #[test]
    fn test_asset_content_type() {
        assert_eq!(asset_content_type("abc.png"), "image/png");
        assert_eq!(asset_content_type("abc.jpeg"), "image/jpeg");
        assert_eq!(asset_content_type("abc"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_load_thumbnail_without_one_is_not_found() {
        let repo = InMemoryVideoRepository::new();
        let (_dir, assets) = assets().await;
        let video = repo.insert_draft(Uuid::new_v4(), "No thumb");

        let err = load_thumbnail(&repo, &assets, video.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Thumbnail not found"));
    }

    #[tokio::test]
    async fn test_load_thumbnail_reads_asset() {
        let repo = InMemoryVideoRepository::new();
        let (_dir, assets) = assets().await;
        let mut video = repo.insert_draft(Uuid::new_v4(), "Thumb");

        let url = assets
            .put_object("abc.png", Bytes::from_static(b"\x89PNG\r\n\x1a\n"), "image/png")
            .await
            .unwrap();
        video.thumbnail_url = Some(url);
        repo.update(&video).await.unwrap();

        let view = load_thumbnail(&repo, &assets, video.id).await.unwrap();
        assert_eq!(view.content_type, "image/png");
        assert_eq!(view.data, Bytes::from_static(b"\x89PNG\r\n\x1a\n"));
    }

    #[tokio::test]
    async fn test_foreign_thumbnail_url_is_not_found() {
        let repo = InMemoryVideoRepository::new();
        let (_dir, assets) = assets().await;
        let mut video = repo.insert_draft(Uuid::new_v4(), "Elsewhere");
        video.thumbnail_url = Some("https://other.example.com/abc.png".to_string());
        repo.update(&video).await.unwrap();

        assert!(matches!(
            load_thumbnail(&repo, &assets, video.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
