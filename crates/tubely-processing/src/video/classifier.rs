use crate::error::ProbeError;
use crate::metadata::GeometryClass;
use crate::traits::MediaProber;
use std::path::Path;
use std::sync::Arc;

/// Classifies a local video as wide, tall or other from its first video stream
#[derive(Clone)]
pub struct MediaClassifier {
    prober: Arc<dyn MediaProber>,
}

impl MediaClassifier {
    pub fn new(prober: Arc<dyn MediaProber>) -> Self {
        Self { prober }
    }

    pub async fn classify(&self, path: &Path) -> Result<GeometryClass, ProbeError> {
        let probe = self.prober.probe(path).await?;
        let dims = probe.first_video_stream()?;
        let class = GeometryClass::from_dimensions(dims);

        tracing::debug!(
            width = dims.width,
            height = dims.height,
            aspect_ratio = dims.aspect_ratio(),
            class = %class,
            "Video classified"
        );

        Ok(class)
    }
}
