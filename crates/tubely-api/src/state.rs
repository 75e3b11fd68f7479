use crate::services::upload::UploadService;
use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    pub uploads: UploadService,
}
