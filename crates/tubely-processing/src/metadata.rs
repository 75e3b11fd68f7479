//! Stream metadata reported by ffprobe and the geometry classes derived from it

use crate::error::ProbeError;
use serde::Deserialize;

/// Aspect ratio above which a video is wide
pub const WIDE_THRESHOLD: f64 = 1.2;

/// Aspect ratio below which a video is tall
pub const TALL_THRESHOLD: f64 = 0.8;

/// Top-level `ffprobe -print_format json -show_streams` document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeOutput {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeStream {
    pub codec_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ProbeOutput {
    pub fn from_json(data: &[u8]) -> Result<Self, ProbeError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Dimensions of the first video stream.
    ///
    /// Streams without a `codec_type` count as video when they carry dimensions.
    pub fn first_video_stream(&self) -> Result<StreamDimensions, ProbeError> {
        let stream = self
            .streams
            .iter()
            .find(|s| match s.codec_type.as_deref() {
                Some(kind) => kind == "video",
                None => s.width.is_some() && s.height.is_some(),
            })
            .ok_or(ProbeError::NoVideoStream)?;

        let (width, height) = match (stream.width, stream.height) {
            (Some(w), Some(h)) => (w, h),
            _ => return Err(ProbeError::NoVideoStream),
        };

        StreamDimensions::new(width, height)
    }
}

/// Pixel dimensions of a video stream, both non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamDimensions {
    pub width: u32,
    pub height: u32,
}

impl StreamDimensions {
    pub fn new(width: u32, height: u32) -> Result<Self, ProbeError> {
        if width == 0 || height == 0 {
            return Err(ProbeError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Coarse shape of a video, used as the key prefix in object storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryClass {
    Wide,
    Tall,
    Other,
}

impl GeometryClass {
    pub fn from_dimensions(dims: StreamDimensions) -> Self {
        let aspect = dims.aspect_ratio();
        if aspect > WIDE_THRESHOLD {
            GeometryClass::Wide
        } else if aspect < TALL_THRESHOLD {
            GeometryClass::Tall
        } else {
            GeometryClass::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryClass::Wide => "wide",
            GeometryClass::Tall => "tall",
            GeometryClass::Other => "other",
        }
    }
}

impl std::fmt::Display for GeometryClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
