//! Seams for the external media tools, so the upload pipeline can run
//! against fakes in tests.

use async_trait::async_trait;
use std::path::Path;

use crate::error::MediaResult;
use crate::metadata::VideoMetadata;
use crate::staging::StagedFile;

/// Reads the dimensions of the first video stream of a local file.
#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> MediaResult<VideoMetadata>;
}

/// Rewrites a local file for progressive playback.
///
/// The returned guard owns the output file; it is removed even when the
/// call fails part way.
#[async_trait]
pub trait MediaNormalize: Send + Sync {
    async fn normalize(&self, input: &Path) -> MediaResult<StagedFile>;
}
