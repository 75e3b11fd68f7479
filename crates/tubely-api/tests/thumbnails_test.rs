//! Thumbnail upload integration tests.
//!
//! Run with: `cargo test -p tubely-api --test thumbnails_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;
use helpers::{
    api_path, bearer, setup_test_app, setup_test_app_with, FailingStage, TestAppOptions,
    TEST_ASSETS_BASE_URL,
};
use serde_json::Value;
use uuid::Uuid;

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDRfake thumbnail";

fn image_form(data: &'static [u8], file_name: &str, mime_type: &str) -> MultipartForm {
    let part = Part::bytes(Bytes::from_static(data))
        .file_name(file_name)
        .mime_type(mime_type);
    MultipartForm::new().add_part("thumbnail", part)
}

#[tokio::test]
async fn test_thumbnail_upload_and_serve() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&api_path(&format!("/videos/{}/thumbnail", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(image_form(PNG_BYTES, "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let url = body["thumbnail_url"].as_str().unwrap();
    assert!(url.starts_with(&format!("{}/", TEST_ASSETS_BASE_URL)));
    assert!(url.ends_with(".png"));
    assert_eq!(app.asset_count(), 1);

    let stored = app.stored_video(video.id).await;
    assert_eq!(stored.thumbnail_url.as_deref(), Some(url));

    let asset_name = url.rsplit('/').next().unwrap();
    let served = app.client().get(&format!("/assets/{}", asset_name)).await;
    assert_eq!(served.status_code(), 200);
    assert_eq!(served.as_bytes().as_ref(), PNG_BYTES);
}

#[tokio::test]
async fn test_thumbnail_jpeg_extension() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&api_path(&format!("/videos/{}/thumbnail", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(image_form(PNG_BYTES, "thumb.jpg", "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert!(body["thumbnail_url"].as_str().unwrap().ends_with(".jpeg"));
}

#[tokio::test]
async fn test_thumbnail_unsupported_media_type() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&api_path(&format!("/videos/{}/thumbnail", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(image_form(b"GIF89a", "thumb.gif", "image/gif"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_MEDIA_TYPE");
    assert_eq!(app.asset_count(), 0);
    assert!(app.stored_video(video.id).await.thumbnail_url.is_none());
}

#[tokio::test]
async fn test_thumbnail_by_other_user_is_forbidden() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&api_path(&format!("/videos/{}/thumbnail", video.id)))
        .add_header("Authorization", bearer(Uuid::new_v4()))
        .multipart(image_form(PNG_BYTES, "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: Value = response.json();
    assert_eq!(body["code"], "FORBIDDEN");
    assert_eq!(app.asset_count(), 0);
}

#[tokio::test]
async fn test_thumbnail_requires_authentication() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&api_path(&format!("/videos/{}/thumbnail", video.id)))
        .multipart(image_form(PNG_BYTES, "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(app.asset_count(), 0);
}

#[tokio::test]
async fn test_thumbnail_too_large() {
    let app = setup_test_app_with(TestAppOptions {
        max_thumbnail_size_bytes: 512,
        ..Default::default()
    })
    .await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let part = Part::bytes(Bytes::from(vec![0u8; 2048]))
        .file_name("big.png")
        .mime_type("image/png");
    let response = app
        .client()
        .post(&api_path(&format!("/videos/{}/thumbnail", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(MultipartForm::new().add_part("thumbnail", part))
        .await;

    assert_eq!(response.status_code(), 413);
    assert_eq!(app.asset_count(), 0);
}

#[tokio::test]
async fn test_thumbnail_removed_when_record_update_fails() {
    let app = setup_test_app_with(TestAppOptions {
        failing_stage: Some(FailingStage::Persistence),
        ..Default::default()
    })
    .await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&api_path(&format!("/videos/{}/thumbnail", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(image_form(PNG_BYTES, "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(app.asset_count(), 0);
    assert!(app.stored_video(video.id).await.thumbnail_url.is_none());
}

#[tokio::test]
async fn test_thumbnail_response_signs_existing_video() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let mut video = app.create_video(owner).await;
    video.video_url = Some("tubely-test-videos,wide/abc.mp4".to_string());
    app.videos.insert(video.clone()).await;

    let response = app
        .client()
        .post(&api_path(&format!("/videos/{}/thumbnail", video.id)))
        .add_header("Authorization", bearer(owner))
        .multipart(image_form(PNG_BYTES, "thumb.png", "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let url = body["video_url"].as_str().unwrap();
    assert!(url.starts_with("https://tubely-test-videos.s3.us-east-1.amazonaws.com/wide/abc.mp4?"));
    assert_eq!(
        app.stored_video(video.id).await.video_url.as_deref(),
        Some("tubely-test-videos,wide/abc.mp4")
    );
}
