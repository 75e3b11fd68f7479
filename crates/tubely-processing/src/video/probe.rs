use super::{validate_path, validate_tool_path};
use crate::error::ProbeError;
use crate::metadata::ProbeOutput;
use crate::traits::MediaProber;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// [`MediaProber`] that shells out to `ffprobe`
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    ffprobe_path: String,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>) -> Result<Self, ProbeError> {
        let ffprobe_path = ffprobe_path.into();
        validate_tool_path(&ffprobe_path).map_err(ProbeError::InvalidPath)?;
        Ok(Self { ffprobe_path })
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError> {
        let start = std::time::Instant::now();
        validate_path(&path.to_string_lossy()).map_err(ProbeError::InvalidPath)?;

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(ProbeError::Spawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(status = %output.status, stderr = %stderr, "ffprobe failed");
            return Err(ProbeError::ToolFailed {
                status: output.status,
                stderr,
            });
        }

        let probe = ProbeOutput::from_json(&output.stdout)?;

        tracing::debug!(
            streams = probe.streams.len(),
            duration_ms = start.elapsed().as_millis(),
            "Video probe completed"
        );

        Ok(probe)
    }
}
