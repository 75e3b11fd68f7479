//! Tubely Storage Library
//!
//! Storage abstraction and implementations for Tubely: the remote object store
//! holding videos, the local asset directory holding thumbnails, and the two
//! pieces of naming logic both depend on.
//!
//! # Key format
//!
//! Asset paths are `{random id}.{subtype}` (see [`keys`]). Video objects are
//! stored under `{classification}/{asset path}`, e.g. `wide/3q2-...Xw.mp4`.
//! Neither part can contain `,`, which is what keeps the flat
//! [`StorageReference`] encoding unambiguous.

pub mod keys;
pub mod local;
pub mod reference;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use keys::{AssetPathGenerator, RandomSource, ThreadRandom};
pub use local::LocalAssetStore;
pub use reference::{mint_access_url, StorageReference, REFERENCE_SEPARATOR};
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
