//! Storage setup and initialization

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{LocalAssetStore, S3Storage, Storage};

/// Open the local assets directory and connect the S3 bucket
pub async fn setup_storage(config: &Config) -> Result<(LocalAssetStore, Arc<dyn Storage>)> {
    let assets = LocalAssetStore::new(
        config.assets_root().clone(),
        config.assets_base_url().to_string(),
    )
    .await
    .context("Failed to initialize assets directory")?;

    tracing::info!(
        root = %assets.root().display(),
        base_url = %config.assets_base_url(),
        "Assets directory ready"
    );

    let s3 = S3Storage::new(
        config.s3_bucket().to_string(),
        config.s3_region().to_string(),
        config.s3_endpoint().map(String::from),
    )
    .await
    .context("Failed to initialize S3 storage")?;

    tracing::info!(
        backend = s3.backend_name(),
        bucket = %s3.bucket(),
        region = %s3.region(),
        endpoint = ?config.s3_endpoint(),
        "Storage initialized successfully"
    );

    Ok((assets, Arc::new(s3)))
}
