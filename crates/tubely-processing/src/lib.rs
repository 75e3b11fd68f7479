//! Tubely Processing Library
//!
//! Video inspection and preparation. The external tools (`ffprobe`, `ffmpeg`)
//! sit behind the [`MediaProber`] and [`StreamOptimizer`] traits so the upload
//! pipeline can run against fakes in tests.

pub mod error;
pub mod metadata;
pub mod traits;
pub mod video;

// Re-export commonly used types
pub use error::{ProbeError, ProcessingError};
pub use metadata::{GeometryClass, ProbeOutput, ProbeStream, StreamDimensions};
pub use traits::{MediaProber, StreamOptimizer};
pub use video::{FfmpegFaststart, FfprobeProber, MediaClassifier, PROCESSING_SUFFIX};
