//! Common utilities for file upload handlers

use crate::error::multipart_error;
use axum::extract::Multipart;
use bytes::Bytes;
use tubely_core::AppError;
use uuid::Uuid;

/// Parse a video id path segment
pub fn parse_video_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidInput("Invalid ID".to_string()))
}

/// Normalize a part's Content-Type into a bare lowercase `type/subtype`.
///
/// Parameters are stripped (`image/png; charset=binary` gives `image/png`).
pub fn parse_media_type(content_type: Option<&str>) -> Result<String, AppError> {
    let invalid = || AppError::InvalidInput("Invalid Content-Type".to_string());

    let essence = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|s| s.trim().to_lowercase())
        .ok_or_else(invalid)?;

    match essence.split_once('/') {
        Some((kind, subtype))
            if !kind.is_empty() && !subtype.is_empty() && !subtype.contains('/') =>
        {
            Ok(essence)
        }
        _ => Err(invalid()),
    }
}

/// Reject media types outside the allowlist
pub fn ensure_media_type(media_type: &str, allowed: &[&str]) -> Result<(), AppError> {
    if !allowed.contains(&media_type) {
        return Err(AppError::UnsupportedMediaType(format!(
            "Invalid media type '{}'. Allowed types: {}",
            media_type,
            allowed.join(", ")
        )));
    }
    Ok(())
}

/// Read the named file field into memory, returning its media type and contents.
///
/// Other fields are skipped.
pub async fn read_file_field(
    multipart: &mut Multipart,
    name: &str,
) -> Result<(String, Bytes), AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(name) {
            continue;
        }

        let media_type = parse_media_type(field.content_type())?;
        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok((media_type, data));
    }

    Err(missing_field(name))
}

pub fn missing_field(name: &str) -> AppError {
    AppError::InvalidInput(format!("Missing form field '{}'", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_video_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_video_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_video_id("not-a-uuid"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_parse_media_type() {
        assert_eq!(parse_media_type(Some("video/mp4")).unwrap(), "video/mp4");
        assert_eq!(
            parse_media_type(Some("Image/PNG; charset=binary")).unwrap(),
            "image/png"
        );
        assert!(parse_media_type(None).is_err());
        assert!(parse_media_type(Some("mp4")).is_err());
        assert!(parse_media_type(Some("video/")).is_err());
        assert!(parse_media_type(Some("video/mp4/x")).is_err());
    }

    #[test]
    fn test_ensure_media_type() {
        assert!(ensure_media_type("image/png", &["image/jpeg", "image/png"]).is_ok());
        let err = ensure_media_type("image/gif", &["image/jpeg", "image/png"]).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMediaType(_)));
        assert!(ensure_media_type("video/quicktime", &["video/mp4"]).is_err());
    }
}
