//! Tubely Database Library
//!
//! Persistence for video records. The upload pipeline talks to the
//! [`VideoRepository`] trait; Postgres backs it in production and an
//! in-memory map backs it in tests.

pub mod repository;

pub use repository::{InMemoryVideoRepository, PgVideoRepository, VideoRepository};

/// Embedded schema migrations, applied at startup
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
