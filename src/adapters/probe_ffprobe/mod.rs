//! FFprobe adapter for media file probing
//!
//! Reads the native frame size of the first video stream.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::PathUtils;

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    ffprobe_path: PathBuf,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter using `ffprobe` from `PATH`
    pub fn new() -> Self {
        Self::with_binary("ffprobe")
    }

    pub fn with_binary(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    /// Extract the frame size from `-of json` output
    pub fn parse_frame_size(stdout: &[u8]) -> Result<FrameSize, String> {
        let probe: FfprobeOutput =
            serde_json::from_slice(stdout).map_err(|e| format!("invalid ffprobe output: {}", e))?;

        let stream = probe
            .streams
            .first()
            .ok_or_else(|| "no video stream found".to_string())?;

        match (stream.width, stream.height) {
            (Some(width), Some(height)) => {
                FrameSize::new(width, height).map_err(|e| e.to_string())
            }
            _ => Err("video stream has no dimensions".to_string()),
        }
    }
}

impl Default for FFprobeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn probe_frame_size(&self, file_path: &Path) -> Result<FrameSize, DomainError> {
        let item = PathUtils::item_id(file_path);
        let open_failure = |message: String| DomainError::SourceOpenFailure {
            item: item.clone(),
            message,
        };

        if !file_path.is_file() {
            return Err(open_failure("file does not exist".to_string()));
        }

        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-select_streams",
                "v:0",
                "-show_entries",
                "stream=width,height",
                "-of",
                "json",
            ])
            .arg(file_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => DomainError::ToolNotAvailable(
                    format!("{}: {}", self.ffprobe_path.display(), e),
                ),
                _ => open_failure(e.to_string()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(open_failure(excerpt(&stderr, 200)));
        }

        let frame = Self::parse_frame_size(&output.stdout).map_err(open_failure)?;
        tracing::debug!(item = %item, frame = %frame, "Probed frame size");
        Ok(frame)
    }
}
