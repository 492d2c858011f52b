//! Shared key generation for storage backends.

use tubely_core::naming::random_file_name;
use tubely_core::AspectRatio;

/// Key for a published video: `{aspect}/{random}.{ext}`.
pub fn video_key(aspect: AspectRatio, extension: &str) -> String {
    format!("{}/{}", aspect.as_str(), random_file_name(extension))
}

/// Key for a thumbnail asset: `{random}.{ext}`.
pub fn asset_key(extension: &str) -> String {
    random_file_name(extension)
}

/// Keys are relative and may not climb out of their root.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('/')
        && !key.contains('\\')
        && !key.split('/').any(|segment| segment == ".." || segment.is_empty())
}
