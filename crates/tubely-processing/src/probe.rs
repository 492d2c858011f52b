//! Video stream probing with ffprobe.

use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::Path;

use crate::command::ToolRunner;
use crate::error::{MediaError, MediaResult};
use crate::metadata::VideoMetadata;
use crate::traits::MediaProbe;

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<serde_json::Value>,
    height: Option<serde_json::Value>,
    codec_name: Option<String>,
}

/// Parse `ffprobe -print_format json -show_streams` output.
pub fn parse_probe_output(stdout: &[u8]) -> MediaResult<VideoMetadata> {
    let output: ProbeOutput = serde_json::from_slice(stdout)?;
    let stream = output
        .streams
        .into_iter()
        .next()
        .ok_or(MediaError::NoVideoStream)?;

    let width = dimension(stream.width.as_ref(), "width")?;
    let height = dimension(stream.height.as_ref(), "height")?;

    Ok(VideoMetadata::new(width, height, stream.codec_name))
}

fn dimension(value: Option<&serde_json::Value>, name: &str) -> MediaResult<u32> {
    value
        .and_then(|v| v.as_u64())
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| MediaError::InvalidOutput(format!("stream {} is missing or not an integer", name)))
}

pub struct FfprobeProber {
    ffprobe_path: String,
    runner: ToolRunner,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>, runner: ToolRunner) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
            runner,
        }
    }
}

#[async_trait]
impl MediaProbe for FfprobeProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> MediaResult<VideoMetadata> {
        let start = std::time::Instant::now();

        let args = [
            OsStr::new("-v"),
            OsStr::new("error"),
            OsStr::new("-print_format"),
            OsStr::new("json"),
            OsStr::new("-show_streams"),
            OsStr::new("-select_streams"),
            OsStr::new("v:0"),
            path.as_os_str(),
        ];
        let output = self.runner.run(&self.ffprobe_path, args).await?;

        let metadata = parse_probe_output(&output.stdout)?;

        tracing::info!(
            width = metadata.width,
            height = metadata.height,
            aspect = %metadata.aspect,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Probed video stream"
        );

        Ok(metadata)
    }
}
