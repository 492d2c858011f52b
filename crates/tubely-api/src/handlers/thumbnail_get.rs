use crate::error::{ErrorResponse, HttpAppError};
use crate::handlers::parse_video_id;
use crate::services::upload::thumbnail::load_thumbnail;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/thumbnails/{videoId}",
    tag = "thumbnails",
    params(
        ("videoId" = uuid::Uuid, Path, description = "Video ID")
    ),
    responses(
        (status = 200, description = "Thumbnail image bytes"),
        (status = 404, description = "Video or thumbnail not found", body = ErrorResponse)
    )
)]
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let view = load_thumbnail(state.videos.as_ref(), &state.assets, video_id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, view.content_type),
            (header::CACHE_CONTROL, "no-store"),
        ],
        view.data,
    ))
}
