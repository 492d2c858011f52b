use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::parse_video_id;
use crate::services::playback::signed_video;
use crate::services::upload::ThumbnailUploadPipeline;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::Video;

#[utoipa::path(
    post,
    path = "/thumbnails/{videoId}",
    tag = "thumbnails",
    params(
        ("videoId" = uuid::Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form with a `thumbnail` file part (image/jpeg or image/png)"),
    responses(
        (status = 200, description = "Updated video record", body = Video),
        (status = 400, description = "Missing, oversized or disallowed file", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Video>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let video = ThumbnailUploadPipeline::from_state(&state)
        .run(video_id, user.user_id, multipart)
        .await?;
    let video = signed_video(state.storage.as_ref(), state.config.storage(), video).await?;

    Ok(Json(video))
}
