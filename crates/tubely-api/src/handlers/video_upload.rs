use crate::auth::models::AuthUser;
use crate::constants::VIDEO_FIELD;
use crate::error::{multipart_error, multipart_rejection, ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{missing_field, parse_media_type, parse_video_id};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::models::VideoResponse;

#[utoipa::path(
    post,
    path = "/api/videos/{id}/video",
    tag = "videos",
    params(
        ("id" = uuid::Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form field 'video' holding a video/mp4 file"),
    responses(
        (status = 200, description = "Video uploaded; video_url is a presigned URL", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Video belongs to another user", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(user_id = %user.user_id, video_id = %id))]
pub async fn upload_video(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoResponse>, HttpAppError> {
    let video_id = parse_video_id(&id)?;
    let video = state
        .uploads
        .authorize_owner(video_id, user.user_id)
        .await?;

    let mut multipart = multipart.map_err(multipart_rejection)?;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let media_type = parse_media_type(field.content_type())?;
        let updated = state
            .uploads
            .upload_video(video, &media_type, &mut field)
            .await?;

        return Ok(Json(state.uploads.sign_video(updated).await?));
    }

    Err(missing_field(VIDEO_FIELD).into())
}
