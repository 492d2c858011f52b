//! Bounded execution of external tools.

use std::ffi::OsStr;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Captured output of a successful run.
#[derive(Debug)]
pub struct ToolOutput {
    pub stdout: Vec<u8>,
    pub stderr: String,
}

/// Runs a program to completion with a wall-clock limit.
///
/// Children are spawned with `kill_on_drop`, so a timed out run, or a caller
/// whose future is dropped, never leaves a process behind.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    timeout: Duration,
}

impl ToolRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn run<I, S>(&self, program: &str, args: I) -> MediaResult<ToolOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let tool = tool_name(program);
        let start = Instant::now();

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| MediaError::Spawn {
                tool: tool.clone(),
                source,
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                // Dropping the wait future dropped the child, which kills it.
                tracing::warn!(
                    tool = %tool,
                    timeout_secs = self.timeout.as_secs(),
                    "External tool timed out, process killed"
                );
                return Err(MediaError::Timeout {
                    tool,
                    secs: self.timeout.as_secs(),
                });
            }
        };

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            tracing::warn!(
                tool = %tool,
                exit_code = ?output.status.code(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                stderr = %stderr,
                "External tool failed"
            );
            return Err(MediaError::ToolFailed {
                tool,
                exit_code: output.status.code(),
                stderr,
            });
        }

        tracing::debug!(
            tool = %tool,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "External tool finished"
        );

        Ok(ToolOutput {
            stdout: output.stdout,
            stderr,
        })
    }
}

/// Final path component of a configured binary, e.g. `ffprobe` for `/usr/bin/ffprobe`.
fn tool_name(program: &str) -> String {
    std::path::Path::new(program)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| program.to_string())
}
