//! Stand-ins for the object store and the ffmpeg tools

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tubely_processing::{
    FfmpegFaststart, MediaProber, ProbeError, ProbeOutput, ProbeStream, ProcessingError,
    StreamOptimizer,
};
use tubely_core::models::{NewVideo, Video};
use tubely_core::AppError;
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_storage::{Storage, StorageError, StorageReference, StorageResult};
use uuid::Uuid;

/// One call to [`Storage::put_file`]
#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub reference: StorageReference,
    pub source: PathBuf,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Object store that records uploads and signs URLs with a fake signature
pub struct RecordingStorage {
    bucket: String,
    puts: Mutex<Vec<RecordedPut>>,
}

impl RecordingStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            puts: Mutex::new(Vec::new()),
        }
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put_file(
        &self,
        target: &StorageReference,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<u64> {
        let size_bytes = tokio::fs::metadata(source).await?.len();
        self.puts.lock().unwrap().push(RecordedPut {
            reference: target.clone(),
            source: source.to_path_buf(),
            content_type: content_type.to_string(),
            size_bytes,
        });
        Ok(size_bytes)
    }

    async fn signed_get_url(
        &self,
        location: &StorageReference,
        expires_in: Duration,
    ) -> StorageResult<String> {
        Ok(format!(
            "https://{}.s3.us-east-1.amazonaws.com/{}?X-Amz-Expires={}&X-Amz-Signature=deadbeef",
            location.bucket(),
            location.key(),
            expires_in.as_secs()
        ))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_name(&self) -> &'static str {
        "recording"
    }
}

/// Prober reporting fixed dimensions, or failing when none are configured
pub struct FakeProber {
    dimensions: Option<(u32, u32)>,
    probed: Mutex<Vec<PathBuf>>,
}

impl FakeProber {
    pub fn new(dimensions: Option<(u32, u32)>) -> Self {
        Self {
            dimensions,
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn probed(&self) -> Vec<PathBuf> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaProber for FakeProber {
    async fn probe(&self, path: &Path) -> Result<ProbeOutput, ProbeError> {
        assert!(path.exists(), "probed file must be staged on disk");
        self.probed.lock().unwrap().push(path.to_path_buf());

        let (width, height) = self.dimensions.ok_or(ProbeError::NoVideoStream)?;
        Ok(ProbeOutput {
            streams: vec![ProbeStream {
                codec_type: Some("video".to_string()),
                width: Some(width),
                height: Some(height),
            }],
        })
    }
}

/// Optimizer that copies the input to the path ffmpeg would write
pub struct CopyOptimizer;

#[async_trait]
impl StreamOptimizer for CopyOptimizer {
    async fn optimize_for_streaming(&self, input: &Path) -> Result<PathBuf, ProcessingError> {
        let output = FfmpegFaststart::output_path(input);
        tokio::fs::copy(input, &output)
            .await
            .map_err(ProcessingError::Spawn)?;
        Ok(output)
    }
}

/// Optimizer whose ffmpeg run always fails
pub struct FailingOptimizer;

#[async_trait]
impl StreamOptimizer for FailingOptimizer {
    async fn optimize_for_streaming(&self, input: &Path) -> Result<PathBuf, ProcessingError> {
        Err(ProcessingError::MissingOutput(
            FfmpegFaststart::output_path(input).display().to_string(),
        ))
    }
}

/// Object store that rejects every upload
pub struct FailingStorage {
    bucket: String,
}

impl FailingStorage {
    pub fn new(bucket: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
        }
    }
}

#[async_trait]
impl Storage for FailingStorage {
    async fn put_file(
        &self,
        target: &StorageReference,
        source: &Path,
        _content_type: &str,
    ) -> StorageResult<u64> {
        assert!(source.exists(), "optimized file must exist during upload");
        Err(StorageError::UploadFailed(format!(
            "access denied for {}",
            target.bucket()
        )))
    }

    async fn signed_get_url(
        &self,
        location: &StorageReference,
        _expires_in: Duration,
    ) -> StorageResult<String> {
        Err(StorageError::SigningFailed(location.key().to_string()))
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}

/// Repository that reads through to memory but cannot persist updates
pub struct FailingUpdates {
    inner: InMemoryVideoRepository,
}

impl FailingUpdates {
    pub fn new(inner: InMemoryVideoRepository) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl VideoRepository for FailingUpdates {
    async fn create_video(&self, video: NewVideo) -> Result<Video, AppError> {
        self.inner.create_video(video).await
    }

    async fn get_video(&self, id: Uuid) -> Result<Video, AppError> {
        self.inner.get_video(id).await
    }

    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        self.inner.list_videos_for_user(user_id).await
    }

    async fn update_video(&self, _video: &Video) -> Result<Video, AppError> {
        Err(AppError::Internal("connection pool exhausted".to_string()))
    }
}
