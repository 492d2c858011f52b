pub mod asset_get;
pub mod thumbnail_get;
pub mod thumbnail_upload;
pub mod video_records;
pub mod video_upload;

use crate::error::HttpAppError;
use uuid::Uuid;

/// Parse a `{videoId}` path segment, answering malformed ids with a JSON 400.
pub(crate) fn parse_video_id(raw: &str) -> Result<Uuid, HttpAppError> {
    Ok(Uuid::parse_str(raw)?)
}
