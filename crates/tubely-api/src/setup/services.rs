//! Service initialization and application state setup

use crate::services::upload::{UploadComponents, UploadService, UploadSettings};
use crate::state::AppState;
use anyhow::{Context, Result};
use sqlx::PgPool;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::{PgVideoRepository, VideoRepository};
use tubely_processing::{FfmpegFaststart, FfprobeProber, MediaClassifier};
use tubely_storage::{AssetPathGenerator, LocalAssetStore, Storage};

/// Build the repositories, media tools and upload pipeline
pub async fn initialize_services(
    config: &Config,
    pool: PgPool,
    assets: LocalAssetStore,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let videos: Arc<dyn VideoRepository> = Arc::new(PgVideoRepository::new(pool));

    let prober = FfprobeProber::new(config.ffprobe_path()).context("Invalid FFPROBE_PATH")?;
    let optimizer =
        FfmpegFaststart::new(config.ffmpeg_path()).context("Invalid FFMPEG_PATH")?;

    tokio::fs::create_dir_all(config.upload_temp_dir())
        .await
        .with_context(|| {
            format!(
                "Failed to create upload temp directory {}",
                config.upload_temp_dir().display()
            )
        })?;

    tracing::info!(
        ffprobe_path = %config.ffprobe_path(),
        ffmpeg_path = %config.ffmpeg_path(),
        temp_dir = %config.upload_temp_dir().display(),
        "Media tools configured"
    );

    let uploads = UploadService::new(UploadComponents {
        videos: videos.clone(),
        assets,
        storage,
        classifier: MediaClassifier::new(Arc::new(prober)),
        optimizer: Arc::new(optimizer),
        asset_paths: AssetPathGenerator::default(),
        settings: upload_settings(config),
    });

    Ok(Arc::new(AppState {
        config: config.clone(),
        videos,
        uploads,
    }))
}

/// Pipeline settings derived from the configuration
pub fn upload_settings(config: &Config) -> UploadSettings {
    UploadSettings {
        bucket: config.s3_bucket().to_string(),
        temp_dir: config.upload_temp_dir().clone(),
        presigned_url_ttl: config.presigned_url_ttl(),
        max_video_size_bytes: config.max_video_size_bytes(),
        max_thumbnail_size_bytes: config.max_thumbnail_size_bytes(),
    }
}
