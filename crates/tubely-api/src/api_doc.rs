//! OpenAPI documentation, served at `/api/openapi.json` and rendered by RapiDoc at `/docs`.
//!
//! Every `/api` route expects an `Authorization: Bearer <token>` header.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use tubely_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tubely API",
        version = "0.1.0",
        description = "Video hosting API: draft video records, thumbnail uploads to local assets and video uploads to S3 with presigned playback URLs."
    ),
    paths(
        handlers::health::health_check,
        // Videos
        handlers::video_create::create_video,
        handlers::video_get::list_videos,
        handlers::video_get::get_video,
        // Uploads
        handlers::thumbnail_upload::upload_thumbnail,
        handlers::video_upload::upload_video,
    ),
    components(
        schemas(
            models::VideoResponse,
            models::CreateVideoRequest,
            error::ErrorResponse,
            handlers::health::HealthResponse,
        )
    ),
    tags(
        (name = "videos", description = "Video records and uploads"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_upload_routes() {
        let spec = ApiDoc::openapi();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| *p == "/api/videos/{id}/thumbnail"));
        assert!(paths.iter().any(|p| *p == "/api/videos/{id}/video"));
        assert!(paths.iter().any(|p| *p == "/api/videos"));
    }
}
