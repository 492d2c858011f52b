//! Domain route groups.

use crate::handlers;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Routes that need a bearer token.
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/videos",
            post(handlers::video_records::create_video).get(handlers::video_records::list_videos),
        )
        .route(
            "/videos/{videoId}",
            post(handlers::video_upload::upload_video).get(handlers::video_records::get_video),
        )
        .route(
            "/thumbnails/{videoId}",
            post(handlers::thumbnail_upload::upload_thumbnail),
        )
}

/// Thumbnail and asset reads, open to anyone with the URL.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/thumbnails/{videoId}",
            get(handlers::thumbnail_get::get_thumbnail),
        )
        .route("/assets/{name}", get(handlers::asset_get::get_asset))
}
