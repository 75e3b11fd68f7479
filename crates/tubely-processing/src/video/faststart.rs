use super::{validate_path, validate_tool_path};
use crate::error::ProcessingError;
use crate::traits::StreamOptimizer;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// Suffix appended to the input path to name the optimized copy
pub const PROCESSING_SUFFIX: &str = ".processing";

/// [`StreamOptimizer`] that moves the MP4 index to the front of the file with
/// `ffmpeg -movflags faststart`, copying streams without re-encoding
#[derive(Debug, Clone)]
pub struct FfmpegFaststart {
    ffmpeg_path: String,
}

impl FfmpegFaststart {
    pub fn new(ffmpeg_path: impl Into<String>) -> Result<Self, ProcessingError> {
        let ffmpeg_path = ffmpeg_path.into();
        validate_tool_path(&ffmpeg_path).map_err(ProcessingError::InvalidPath)?;
        Ok(Self { ffmpeg_path })
    }

    pub fn output_path(input: &Path) -> PathBuf {
        let mut name = OsString::from(input.as_os_str());
        name.push(PROCESSING_SUFFIX);
        PathBuf::from(name)
    }
}

async fn remove_partial_output(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove partial output");
        }
    }
}

#[async_trait]
impl StreamOptimizer for FfmpegFaststart {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn optimize_for_streaming(&self, input: &Path) -> Result<PathBuf, ProcessingError> {
        let start = std::time::Instant::now();
        validate_path(&input.to_string_lossy()).map_err(ProcessingError::InvalidPath)?;
        let output_path = Self::output_path(input);

        let result = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(e) => {
                remove_partial_output(&output_path).await;
                return Err(ProcessingError::Spawn(e));
            }
        };

        if !output.status.success() {
            remove_partial_output(&output_path).await;
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(status = %output.status, stderr = %stderr, "ffmpeg faststart failed");
            return Err(ProcessingError::ToolFailed {
                status: output.status,
                stderr,
            });
        }

        if !tokio::fs::try_exists(&output_path).await.unwrap_or(false) {
            return Err(ProcessingError::MissingOutput(
                output_path.display().to_string(),
            ));
        }

        tracing::debug!(
            output = %output_path.display(),
            duration_ms = start.elapsed().as_millis(),
            "Faststart rewrite completed"
        );

        Ok(output_path)
    }
}
