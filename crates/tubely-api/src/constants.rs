//! API constants

/// API base path prefix
pub const API_PREFIX: &str = "/api";

/// Multipart field carrying a thumbnail image
pub const THUMBNAIL_FIELD: &str = "thumbnail";

/// Multipart field carrying a video file
pub const VIDEO_FIELD: &str = "video";

/// Media types accepted as thumbnails
pub const THUMBNAIL_MEDIA_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Media type accepted as video
pub const VIDEO_MEDIA_TYPE: &str = "video/mp4";

