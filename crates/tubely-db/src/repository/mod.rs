mod memory;
mod postgres;

pub use memory::InMemoryVideoRepository;
pub use postgres::PgVideoRepository;

use async_trait::async_trait;
use tubely_core::models::{NewVideo, Video};
use tubely_core::AppError;
use uuid::Uuid;

/// Video metadata store
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Insert a draft record with no thumbnail or video yet
    async fn create_video(&self, video: NewVideo) -> Result<Video, AppError>;

    /// Fetch a record by id. Missing records yield [`AppError::NotFound`].
    async fn get_video(&self, id: Uuid) -> Result<Video, AppError>;

    /// All records owned by `user_id`, newest first
    async fn list_videos_for_user(&self, user_id: Uuid) -> Result<Vec<Video>, AppError>;

    /// Persist the mutable fields of `video` and bump `updated_at`.
    ///
    /// Returns the stored record. Missing records yield [`AppError::NotFound`].
    async fn update_video(&self, video: &Video) -> Result<Video, AppError>;
}
