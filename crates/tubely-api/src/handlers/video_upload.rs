use crate::auth::AuthUser;
use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::parse_video_id;
use crate::services::upload::VideoUploadPipeline;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/videos/{videoId}",
    tag = "videos",
    params(
        ("videoId" = uuid::Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form with a `video` file part (video/mp4)"),
    responses(
        (status = 200, description = "Video processed and published"),
        (status = 400, description = "Missing, oversized or disallowed file", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the video", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 500, description = "Processing or storage failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(video_id): Path<String>,
    multipart: Multipart,
) -> Result<Json<()>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    VideoUploadPipeline::from_state(&state)
        .run(video_id, user.user_id, multipart)
        .await?;

    Ok(Json(()))
}
