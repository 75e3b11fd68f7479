//! Data models for the application

mod video;

pub use video::{CreateVideoRequest, NewVideo, Video, VideoResponse};
