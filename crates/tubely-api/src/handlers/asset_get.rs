use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::thumbnail::asset_content_type;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;
use tubely_storage::Storage;

#[utoipa::path(
    get,
    path = "/assets/{name}",
    tag = "thumbnails",
    params(
        ("name" = String, Path, description = "Asset file name")
    ),
    responses(
        (status = 200, description = "Asset bytes"),
        (status = 400, description = "Invalid asset name", body = ErrorResponse),
        (status = 404, description = "Asset not found", body = ErrorResponse)
    )
)]
pub async fn get_asset(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let data = state.assets.get_object(&name).await?;

    Ok(([(header::CONTENT_TYPE, asset_content_type(&name))], data))
}
