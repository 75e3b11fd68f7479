use crate::traits::{StorageError, StorageResult};
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Local directory holding thumbnails, served as static files
#[derive(Clone, Debug)]
pub struct LocalAssetStore {
    root: PathBuf,
    base_url: String,
}

impl LocalAssetStore {
    /// Open the assets root, creating it if missing
    ///
    /// # Arguments
    /// * `root` - Directory for asset files (e.g., "./assets")
    /// * `base_url` - Public URL the directory is served at (e.g., "http://localhost:8091/assets")
    pub async fn new(root: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let root = root.into();

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o755);

        builder.create(&root).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create assets directory {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(LocalAssetStore { root, base_url })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an asset path to its location on disk.
    ///
    /// Assets live at the top level of the root, so any path separator or
    /// traversal sequence is rejected.
    pub fn disk_path(&self, asset_path: &str) -> StorageResult<PathBuf> {
        if asset_path.is_empty()
            || asset_path.starts_with('.')
            || asset_path.contains("..")
            || asset_path.contains('/')
            || asset_path.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Asset path contains invalid characters".to_string(),
            ));
        }

        Ok(self.root.join(asset_path))
    }

    /// Public URL of an asset
    pub fn public_url(&self, asset_path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), asset_path)
    }

    /// Write a new asset and return its public URL.
    ///
    /// Existing files are never overwritten.
    pub async fn write(&self, asset_path: &str, data: &[u8]) -> StorageResult<String> {
        let path = self.disk_path(asset_path)?;
        let start = std::time::Instant::now();

        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(data).await?;
        file.sync_all().await?;

        tracing::info!(
            path = %path.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Asset written"
        );

        Ok(self.public_url(asset_path))
    }

    /// Delete an asset written by [`write`](Self::write)
    pub async fn remove(&self, asset_path: &str) -> StorageResult<()> {
        let path = self.disk_path(asset_path)?;
        fs::remove_file(&path).await?;
        tracing::debug!(path = %path.display(), "Asset removed");
        Ok(())
    }
}
