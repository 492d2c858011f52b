use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::constants::{THUMBNAIL_CONTENT_TYPES, THUMBNAIL_FIELD, VIDEO_CONTENT_TYPES, VIDEO_FIELD};

/// Coarse orientation of a video, used as the first segment of its object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    Landscape,
    Portrait,
    Other,
}

impl AspectRatio {
    /// Exact 16:9 test with integer division, no tolerance: a 1918x1080
    /// video is `Other`.
    pub fn classify(width: u32, height: u32) -> Self {
        let (w, h) = (u64::from(width), u64::from(height));
        if w == 16 * h / 9 {
            AspectRatio::Landscape
        } else if h == 16 * w / 9 {
            AspectRatio::Portrait
        } else {
            AspectRatio::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "landscape",
            AspectRatio::Portrait => "portrait",
            AspectRatio::Other => "other",
        }
    }
}

impl Display for AspectRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// The two kinds of asset a client can attach to a video record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Video,
    Thumbnail,
}

impl UploadKind {
    /// Multipart field the payload is expected under.
    pub fn field_name(&self) -> &'static str {
        match self {
            UploadKind::Video => VIDEO_FIELD,
            UploadKind::Thumbnail => THUMBNAIL_FIELD,
        }
    }

    pub fn allowed_content_types(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Video => VIDEO_CONTENT_TYPES,
            UploadKind::Thumbnail => THUMBNAIL_CONTENT_TYPES,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UploadKind::Video => "Video",
            UploadKind::Thumbnail => "Thumbnail",
        }
    }
}
