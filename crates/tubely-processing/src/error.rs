//! Errors raised by the external media tools

use std::process::ExitStatus;
use thiserror::Error;
use tubely_core::AppError;

/// Failure while inspecting a media file
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Failed to execute ffprobe: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffprobe exited with {status}: {stderr}")]
    ToolFailed { status: ExitStatus, stderr: String },

    #[error("Failed to parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No video stream found")]
    NoVideoStream,

    #[error("Invalid stream dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Failure while rewriting a media file
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to execute ffmpeg: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffmpeg exited with {status}: {stderr}")]
    ToolFailed { status: ExitStatus, stderr: String },

    #[error("ffmpeg produced no output at {0}")]
    MissingOutput(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl From<ProbeError> for AppError {
    fn from(err: ProbeError) -> Self {
        AppError::Probe(err.to_string())
    }
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        AppError::Processing(err.to_string())
    }
}
