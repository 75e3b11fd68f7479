//! Request-scoped temp files for video uploads

use axum::extract::multipart::Field;
use std::path::Path;
use tempfile::TempPath;
use tokio::io::AsyncWriteExt;
use tubely_core::AppError;

use crate::error::multipart_error;

/// Prefix of every staged upload in the temp directory
pub const STAGED_FILE_PREFIX: &str = "tubely-upload";

/// Stream a multipart field into a uniquely named temp file.
///
/// The returned [`TempPath`] deletes the file when dropped, so every early
/// return in the pipeline cleans up after itself. Fails with
/// [`AppError::PayloadTooLarge`] once more than `max_bytes` have been received.
pub async fn stage_field(
    field: &mut Field<'_>,
    temp_dir: &Path,
    max_bytes: usize,
) -> Result<(TempPath, u64), AppError> {
    let (file, path) = tempfile::Builder::new()
        .prefix(STAGED_FILE_PREFIX)
        .suffix(".mp4")
        .tempfile_in(temp_dir)?
        .into_parts();
    let mut file = tokio::fs::File::from_std(file);
    let mut written: u64 = 0;

    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        written += chunk.len() as u64;
        if written > max_bytes as u64 {
            return Err(AppError::PayloadTooLarge(format!(
                "File size exceeds maximum allowed size of {} MB",
                max_bytes / 1024 / 1024
            )));
        }
        file.write_all(&chunk).await?;
    }

    file.flush().await?;
    file.sync_all().await?;

    if written == 0 {
        return Err(AppError::InvalidInput("File is empty".to_string()));
    }

    tracing::debug!(
        path = %path.display(),
        size_bytes = written,
        "Upload staged to disk"
    );

    Ok((path, written))
}
