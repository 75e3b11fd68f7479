//! Storage abstraction trait
//!
//! This module defines the Storage trait the remote object store must implement.

use crate::reference::StorageReference;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tubely_core::AppError;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Presigning failed: {0}")]
    SigningFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Malformed storage reference: {0}")]
    MalformedReference(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::UploadFailed(msg) => AppError::Storage(msg),
            StorageError::SigningFailed(msg) => AppError::Storage(msg),
            StorageError::BackendError(msg) => AppError::Storage(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::MalformedReference(msg) => AppError::MalformedReference(msg),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        }
    }
}

/// Remote object storage
///
/// Objects are addressed by a [`StorageReference`] (bucket + key) so callers
/// never juggle the two halves separately.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload the local file at `source` to `target` with the given content type.
    ///
    /// Returns the number of bytes written.
    async fn put_file(
        &self,
        target: &StorageReference,
        source: &Path,
        content_type: &str,
    ) -> StorageResult<u64>;

    /// Mint a time-limited signed GET URL for the object.
    ///
    /// Signatures expire, so the result must not be cached past `expires_in`.
    async fn signed_get_url(
        &self,
        location: &StorageReference,
        expires_in: Duration,
    ) -> StorageResult<String>;

    /// Bucket new objects are written to
    fn bucket(&self) -> &str;

    /// Storage backend name, used in logs
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_core::ErrorMetadata;

    #[test]
    fn storage_errors_map_to_app_errors() {
        let err: AppError = StorageError::UploadFailed("timeout".to_string()).into();
        assert!(matches!(err, AppError::Storage(_)));
        assert_eq!(err.http_status_code(), 500);

        let err: AppError = StorageError::MalformedReference("no separator".to_string()).into();
        assert!(matches!(err, AppError::MalformedReference(_)));
        assert_eq!(err.http_status_code(), 500);

        let err: AppError = StorageError::InvalidKey("../etc".to_string()).into();
        assert_eq!(err.http_status_code(), 400);
    }
}
