//! Tubely Core Library
//!
//! Domain models, the unified error type and configuration shared by every
//! Tubely crate.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BaseConfig, Config, TubelyConfig, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
