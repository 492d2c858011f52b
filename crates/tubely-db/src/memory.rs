//! In-memory repository for testing without a database

use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tubely_core::models::{CreateVideoRequest, Video};
use tubely_core::AppError;
use uuid::Uuid;

use crate::video::VideoRepository;

#[derive(Clone, Default)]
pub struct InMemoryVideoRepository {
    videos: Arc<Mutex<HashMap<Uuid, Video>>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a draft record owned by `user_id` and return it.
    pub fn insert_draft(&self, user_id: Uuid, title: &str) -> Video {
        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            user_id,
            title: title.to_string(),
            description: String::new(),
            video_url: None,
            thumbnail_url: None,
            video_key: None,
            created_at: now,
            updated_at: now,
        };
        self.lock().insert(video.id, video.clone());
        video
    }

    /// Current state of a record, bypassing the trait.
    pub fn snapshot(&self, id: Uuid) -> Option<Video> {
        self.lock().get(&id).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Video>> {
        // A panicking test thread must not take the other tests down with it.
        self.videos.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create(&self, user_id: Uuid, request: CreateVideoRequest) -> Result<Video, AppError> {
        let mut video = self.insert_draft(user_id, &request.title);
        video.description = request.description;
        self.lock().insert(video.id, video.clone());
        Ok(video)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.snapshot(id))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let mut videos: Vec<Video> = self
            .lock()
            .values()
            .filter(|video| video.user_id == user_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(videos)
    }

    async fn update(&self, video: &Video) -> Result<Video, AppError> {
        let mut videos = self.lock();
        let stored = videos
            .get_mut(&video.id)
            .ok_or_else(|| AppError::NotFound(format!("Video {} not found", video.id)))?;

        *stored = Video {
            updated_at: Utc::now(),
            ..video.clone()
        };
        Ok(stored.clone())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
