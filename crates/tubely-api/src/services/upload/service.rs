use crate::constants::{THUMBNAIL_MEDIA_TYPES, VIDEO_MEDIA_TYPE};
use crate::services::upload::staging::stage_field;
use crate::utils::upload::ensure_media_type;
use axum::extract::multipart::Field;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempPath;
use tubely_core::models::{Video, VideoResponse};
use tubely_core::AppError;
use tubely_db::VideoRepository;
use tubely_processing::{MediaClassifier, StreamOptimizer};
use tubely_storage::{
    mint_access_url, AssetPathGenerator, LocalAssetStore, Storage, StorageReference,
};
use uuid::Uuid;

/// Limits and locations of the upload pipeline
#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Bucket new videos are committed to
    pub bucket: String,
    /// Directory for staged uploads and their optimized copies
    pub temp_dir: PathBuf,
    pub presigned_url_ttl: Duration,
    pub max_video_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
}

/// Everything the pipeline talks to
pub struct UploadComponents {
    pub videos: Arc<dyn VideoRepository>,
    pub assets: LocalAssetStore,
    pub storage: Arc<dyn Storage>,
    pub classifier: MediaClassifier,
    pub optimizer: Arc<dyn StreamOptimizer>,
    pub asset_paths: AssetPathGenerator,
    pub settings: UploadSettings,
}

/// Orchestrates thumbnail and video uploads for a single video record
#[derive(Clone)]
pub struct UploadService {
    videos: Arc<dyn VideoRepository>,
    assets: LocalAssetStore,
    storage: Arc<dyn Storage>,
    classifier: MediaClassifier,
    optimizer: Arc<dyn StreamOptimizer>,
    asset_paths: AssetPathGenerator,
    settings: UploadSettings,
}

impl UploadService {
    pub fn new(components: UploadComponents) -> Self {
        let UploadComponents {
            videos,
            assets,
            storage,
            classifier,
            optimizer,
            asset_paths,
            settings,
        } = components;

        Self {
            videos,
            assets,
            storage,
            classifier,
            optimizer,
            asset_paths,
            settings,
        }
    }

    pub fn settings(&self) -> &UploadSettings {
        &self.settings
    }

    /// Load the record and check that `user_id` owns it.
    ///
    /// A missing record is NotFound, another owner's record is Forbidden.
    pub async fn authorize_owner(&self, video_id: Uuid, user_id: Uuid) -> Result<Video, AppError> {
        let video = self.videos.get_video(video_id).await?;

        if !video.is_owned_by(user_id) {
            tracing::warn!(
                video_id = %video_id,
                user_id = %user_id,
                "Upload attempted on another user's video"
            );
            return Err(AppError::Forbidden(
                "Unable to update this video".to_string(),
            ));
        }

        Ok(video)
    }

    /// Store a thumbnail image on local disk and point the record at it
    #[tracing::instrument(skip(self, video, data), fields(video_id = %video.id, size_bytes = data.len()))]
    pub async fn upload_thumbnail(
        &self,
        mut video: Video,
        media_type: &str,
        data: &[u8],
    ) -> Result<Video, AppError> {
        ensure_media_type(media_type, THUMBNAIL_MEDIA_TYPES)?;

        if data.is_empty() {
            return Err(AppError::InvalidInput("File is empty".to_string()));
        }
        if data.len() > self.settings.max_thumbnail_size_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "File size exceeds maximum allowed size of {} MB",
                self.settings.max_thumbnail_size_bytes / 1024 / 1024
            )));
        }

        let asset_path = self.asset_paths.new_asset_path(media_type);
        let url = self.assets.write(&asset_path, data).await?;

        video.thumbnail_url = Some(url);
        let updated = match self.videos.update_video(&video).await {
            Ok(updated) => updated,
            Err(err) => {
                // Nothing points at the asset any more
                if let Err(e) = self.assets.remove(&asset_path).await {
                    tracing::warn!(
                        error = %e,
                        asset_path = %asset_path,
                        "Failed to remove orphaned thumbnail"
                    );
                }
                return Err(err);
            }
        };

        tracing::info!(asset_path = %asset_path, "Thumbnail uploaded");
        Ok(updated)
    }

    /// Run the video pipeline for a multipart field and persist the storage reference.
    ///
    /// Stages run one after another. Staged and optimized temp files are removed
    /// on every exit path.
    #[tracing::instrument(skip(self, video, field), fields(video_id = %video.id))]
    pub async fn upload_video(
        &self,
        mut video: Video,
        media_type: &str,
        field: &mut Field<'_>,
    ) -> Result<Video, AppError> {
        let start = std::time::Instant::now();
        ensure_media_type(media_type, &[VIDEO_MEDIA_TYPE])?;

        let (staged, size_bytes) = stage_field(
            field,
            &self.settings.temp_dir,
            self.settings.max_video_size_bytes,
        )
        .await?;

        let class = self.classifier.classify(&staged).await?;

        let optimized =
            TempPath::try_from_path(self.optimizer.optimize_for_streaming(&staged).await?)?;

        let key = format!(
            "{}/{}",
            class.as_str(),
            self.asset_paths.new_asset_path(media_type)
        );
        let reference = StorageReference::new(self.settings.bucket.as_str(), key)?;

        self.storage
            .put_file(&reference, &optimized, media_type)
            .await?;

        video.video_url = Some(reference.encode());
        let updated = self.videos.update_video(&video).await?;

        remove_temp_file(optimized);
        remove_temp_file(staged);

        tracing::info!(
            bucket = %reference.bucket(),
            key = %reference.key(),
            class = %class,
            size_bytes,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video uploaded"
        );

        Ok(updated)
    }

    /// Replace the persisted storage reference with a freshly minted access URL
    pub async fn sign_video(&self, video: Video) -> Result<VideoResponse, AppError> {
        let mut response = VideoResponse::from(video);

        if let Some(encoded) = response.video_url.take() {
            let reference = StorageReference::decode(&encoded)?;
            let url = mint_access_url(
                self.storage.as_ref(),
                &reference,
                self.settings.presigned_url_ttl,
            )
            .await?;
            response.video_url = Some(url);
        }

        Ok(response)
    }
}

fn remove_temp_file(path: TempPath) {
    let shown = path.display().to_string();
    if let Err(e) = path.close() {
        tracing::warn!(error = %e, path = %shown, "Failed to remove temp file");
    }
}
