use super::VideoRepository;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres};
use tubely_core::models::{NewVideo, Video};
use tubely_core::AppError;
use uuid::Uuid;

const VIDEO_COLUMNS: &str =
    "id, created_at, updated_at, title, description, thumbnail_url, video_url, user_id";

/// Repository for video records stored in Postgres
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "insert"))]
    async fn create_video(&self, video: NewVideo) -> Result<Video, AppError> {
        let query = format!(
            r#"
            INSERT INTO videos (id, title, description, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        );

        let created = sqlx::query_as::<Postgres, Video>(&query)
            .bind(Uuid::new_v4())
            .bind(&video.title)
            .bind(&video.description)
            .bind(video.user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    async fn get_video(&self, id: Uuid) -> Result<Video, AppError> {
        let query = format!("SELECT {} FROM videos WHERE id = $1", VIDEO_COLUMNS);

        sqlx::query_as::<Postgres, Video>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }

    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select"))]
    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError> {
        let query = format!(
            "SELECT {} FROM videos WHERE user_id = $1 ORDER BY created_at DESC",
            VIDEO_COLUMNS
        );

        let videos = sqlx::query_as::<Postgres, Video>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    async fn update_video(&self, video: &Video) -> Result<Video, AppError> {
        let query = format!(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, video_url = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VIDEO_COLUMNS
        );

        sqlx::query_as::<Postgres, Video>(&query)
            .bind(video.id)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.thumbnail_url)
            .bind(&video.video_url)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".to_string()))
    }
}
