//! Local staging of uploads for the external tools.
//!
//! Every staged file is owned by a [`StagedFile`] guard. The file is removed
//! when the guard is cleaned up or dropped, whichever comes first, so no exit
//! path of a request (including cancellation) leaves it behind. Removal
//! failures are logged and never returned.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tubely_core::naming::random_file_name;

/// Directory uploads are staged in.
#[derive(Debug, Clone)]
pub struct StagingArea {
    dir: PathBuf,
}

impl StagingArea {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` to `{dir}/{random}.{extension}`.
    pub async fn stage(&self, data: &[u8], extension: &str) -> std::io::Result<StagedFile> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let guard = StagedFile::adopt(self.dir.join(random_file_name(extension)));

        let mut file = tokio::fs::File::create(guard.path()).await?;
        file.write_all(data).await?;
        file.flush().await?;

        tracing::debug!(
            path = %guard.path().display(),
            size_bytes = data.len(),
            "Staged upload"
        );

        Ok(guard)
    }
}

/// Owns a temporary file and removes it exactly once.
#[derive(Debug)]
pub struct StagedFile {
    path: PathBuf,
    removed: bool,
}

impl StagedFile {
    /// Take ownership of a file some other step created (or is about to).
    pub fn adopt(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            removed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    /// Remove the file now.
    pub async fn cleanup(mut self) {
        self.removed = true;
        log_removal(&self.path, tokio::fs::remove_file(&self.path).await);
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if !self.removed {
            self.removed = true;
            log_removal(&self.path, std::fs::remove_file(&self.path));
        }
    }
}

fn log_removal(path: &Path, result: std::io::Result<()>) {
    match result {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed staged file"),
        // A step that failed before creating its output leaves nothing to remove.
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(
            path = %path.display(),
            error = %e,
            "Failed to remove staged file"
        ),
    }
}
