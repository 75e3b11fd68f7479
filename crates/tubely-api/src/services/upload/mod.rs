//! Upload pipeline
//!
//! Thumbnails are written to the local assets directory. Videos are staged to
//! a temp file, classified by shape, rewritten for streaming and committed to
//! object storage under `<class>/<asset path>`.

mod service;
mod staging;

pub use service::{UploadComponents, UploadService, UploadSettings};
pub use staging::{stage_field, STAGED_FILE_PREFIX};
