use crate::auth::models::AuthUser;
use crate::constants::THUMBNAIL_FIELD;
use crate::error::{multipart_rejection, ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::{parse_video_id, read_file_field};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use std::sync::Arc;
use tubely_core::models::VideoResponse;

#[utoipa::path(
    post,
    path = "/api/videos/{id}/thumbnail",
    tag = "videos",
    params(
        ("id" = uuid::Uuid, Path, description = "Video ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form field 'thumbnail' holding an image/jpeg or image/png file"),
    responses(
        (status = 200, description = "Thumbnail uploaded", body = VideoResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Video belongs to another user", body = ErrorResponse),
        (status = 404, description = "Video not found", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip_all, fields(user_id = %user.user_id, video_id = %id))]
pub async fn upload_thumbnail(
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
    let (media_type, data) = read_file_field(&mut multipart, THUMBNAIL_FIELD).await?;

    let updated = state
        .uploads
        .upload_thumbnail(video, &media_type, &data)
        .await?;

    Ok(Json(state.uploads.sign_video(updated).await?))
}
