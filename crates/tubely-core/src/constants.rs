//! Upload limits and naming constants.

/// Default ceiling for a single video upload (1 GiB).
pub const MAX_VIDEO_UPLOAD_BYTES: usize = 1 << 30;

/// Default ceiling for a single thumbnail upload (10 MiB).
pub const MAX_THUMBNAIL_UPLOAD_BYTES: usize = 10 << 20;

/// Number of random bytes behind every generated file or object name.
/// Hex-encoded this yields a 64 character name with 256 bits of entropy,
/// which is the only collision avoidance for staged files and object keys.
pub const RANDOM_NAME_BYTES: usize = 32;

/// Multipart field carrying the video payload.
pub const VIDEO_FIELD: &str = "video";

/// Multipart field carrying the thumbnail payload.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

pub const VIDEO_CONTENT_TYPES: &[&str] = &["video/mp4"];
pub const THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Suffix appended to a staged file by the fast-start normalizer.
pub const PROCESSED_SUFFIX: &str = ".processed.mp4";
