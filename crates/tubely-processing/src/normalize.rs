//! Fast-start remux with ffmpeg.

use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::command::ToolRunner;
use crate::error::MediaResult;
use crate::staging::StagedFile;
use crate::traits::MediaNormalize;
use tubely_core::constants::PROCESSED_SUFFIX;

/// `{input}.processed.mp4`
pub fn processed_path_for(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(PROCESSED_SUFFIX);
    PathBuf::from(name)
}

/// Moves the MP4 index to the front of the file without re-encoding.
pub struct FastStartNormalizer {
    ffmpeg_path: String,
    runner: ToolRunner,
}

impl FastStartNormalizer {
    pub fn new(ffmpeg_path: impl Into<String>, runner: ToolRunner) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            runner,
        }
    }
}

#[async_trait]
impl MediaNormalize for FastStartNormalizer {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn normalize(&self, input: &Path) -> MediaResult<StagedFile> {
        let start = std::time::Instant::now();
        // Guard first: ffmpeg may leave a partial output behind on failure.
        let output = StagedFile::adopt(processed_path_for(input));

        let args = [
            OsStr::new("-y"),
            OsStr::new("-v"),
            OsStr::new("error"),
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-movflags"),
            OsStr::new("faststart"),
            OsStr::new("-map_metadata"),
            OsStr::new("0"),
            OsStr::new("-codec"),
            OsStr::new("copy"),
            OsStr::new("-f"),
            OsStr::new("mp4"),
            output.path().as_os_str(),
        ];
        self.runner.run(&self.ffmpeg_path, args).await?;

        tracing::info!(
            output = %output.path().display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Normalized video for fast start"
        );

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processed_path_is_deterministic() {
        let input = Path::new("/tmp/staging/abc.mp4");
        assert_eq!(
            processed_path_for(input),
            PathBuf::from("/tmp/staging/abc.mp4.processed.mp4")
        );
        assert_eq!(processed_path_for(input), processed_path_for(input));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_normalize_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("abc.mp4");
        std::fs::write(&input, b"not a video").unwrap();
        // Stand-in for a partial output left by an interrupted remux.
        std::fs::write(processed_path_for(&input), b"partial").unwrap();

        let normalizer = FastStartNormalizer::new("false", ToolRunner::from_secs(5));
        let err = normalizer.normalize(&input).await.unwrap_err();

        assert!(matches!(err, crate::MediaError::ToolFailed { .. }));
        assert!(!processed_path_for(&input).exists());
        assert!(input.exists());
    }
}
