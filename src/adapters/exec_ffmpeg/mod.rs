//! FFmpeg execution adapter
//!
//! Runs the external `ffmpeg` binary once per crop job and waits for it to exit.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::CropCommandRules;
use crate::ports::*;

/// FFmpeg-based transcode adapter
pub struct FFmpegAdapter {
    ffmpeg_path: PathBuf,
    excerpt_len: usize,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter using `ffmpeg` from `PATH`
    pub fn new() -> Self {
        Self::with_binary("ffmpeg")
    }

    pub fn with_binary(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            excerpt_len: DEFAULT_EXCERPT_LEN,
        }
    }

    pub fn with_excerpt_len(mut self, excerpt_len: usize) -> Self {
        self.excerpt_len = excerpt_len;
        self
    }

    fn not_available(&self, reason: impl std::fmt::Display) -> DomainError {
        DomainError::ToolNotAvailable(format!("{}: {}", self.ffmpeg_path.display(), reason))
    }
}

impl Default for FFmpegAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscodePort for FFmpegAdapter {
    async fn check_available(&self) -> Result<String, DomainError> {
        let output = Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.not_available(e))?;

        if !output.status.success() {
            return Err(self.not_available(format!("-version exited with {}", output.status)));
        }

        let banner = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();
        debug!("Found {}", banner);
        Ok(banner)
    }

    async fn crop(&self, job: &CropJob) -> Result<(), DomainError> {
        let args = CropCommandRules::transcode_args(&job.input_path, &job.output_path, &job.rect);
        debug!("Running {} {}", self.ffmpeg_path.display(), args.join(" "));

        let output = Command::new(&self.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => self.not_available(e),
                _ => DomainError::transcode_failure(&job.item, None, &e.to_string(), self.excerpt_len),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(
            item = %job.item,
            code = ?output.status.code(),
            "ffmpeg exited with failure"
        );
        Err(DomainError::transcode_failure(
            &job.item,
            output.status.code(),
            &stderr,
            self.excerpt_len,
        ))
    }
}
