//! Fake media tools that record how often they ran.

use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tubely_processing::{
    processed_path_for, MediaError, MediaNormalize, MediaProbe, MediaResult, StagedFile,
    VideoMetadata,
};

#[derive(Clone)]
pub struct FakeProber {
    dimensions: Option<(u32, u32)>,
    calls: Arc<AtomicUsize>,
}

impl FakeProber {
    pub fn landscape() -> Self {
        Self::with_dimensions(1920, 1080)
    }

    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            dimensions: Some((width, height)),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Behaves like ffprobe on a file that is not a video.
    pub fn failing() -> Self {
        Self {
            dimensions: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaProbe for FakeProber {
    async fn probe(&self, path: &Path) -> MediaResult<VideoMetadata> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert!(path.exists(), "probe must run on a staged file");

        match self.dimensions {
            Some((width, height)) => Ok(VideoMetadata::new(width, height, Some("h264".to_string()))),
            None => Err(MediaError::ToolFailed {
                tool: "ffprobe".to_string(),
                exit_code: Some(1),
                stderr: "moov atom not found".to_string(),
            }),
        }
    }
}

/// Copies the input to the processed path instead of running ffmpeg.
#[derive(Clone, Default)]
pub struct FakeNormalizer {
    fail: bool,
    calls: Arc<AtomicUsize>,
}

impl FakeNormalizer {
    /// Behaves like ffmpeg dying halfway: a truncated output is left on disk
    /// and nothing owns it.
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaNormalize for FakeNormalizer {
    async fn normalize(&self, input: &Path) -> MediaResult<StagedFile> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail {
            tokio::fs::write(processed_path_for(input), b"\x00\x00\x00\x20ftyp").await?;
            return Err(MediaError::ToolFailed {
                tool: "ffmpeg".to_string(),
                exit_code: Some(1),
                stderr: "Conversion failed!".to_string(),
            });
        }

        let output = StagedFile::adopt(processed_path_for(input));
        tokio::fs::copy(input, output.path()).await?;
        Ok(output)
    }
}
