//! Seams around the external media tools

use crate::error::{ProbeError, ProcessingError};
use crate::metadata::ProbeOutput;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads stream metadata from a local media file
#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError>;
}

/// Rewrites a media file so playback can start before the download finishes
#[async_trait]
pub trait StreamOptimizer: Send + Sync {
    /// Write an optimized copy next to `input` and return its path.
    ///
    /// The input is left untouched. The caller owns both files afterwards.
    async fn optimize_for_streaming(&self, input: &Path) -> Result<PathBuf, ProcessingError>;
}
