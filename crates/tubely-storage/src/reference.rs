//! Storage references: the `bucket,key` string persisted on a video record.
//!
//! The flat string only exists at the metadata-store boundary. Everywhere else
//! the pair travels as a [`StorageReference`].

use crate::traits::{Storage, StorageError, StorageResult};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use std::time::Duration;

/// Separator between bucket and key in the encoded form
pub const REFERENCE_SEPARATOR: char = ',';

/// Location of an object in remote storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageReference {
    bucket: String,
    key: String,
}

impl StorageReference {
    /// Build a reference, rejecting components that could not be decoded again.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> StorageResult<Self> {
        let bucket = bucket.into();
        let key = key.into();

        if bucket.is_empty() || key.is_empty() {
            return Err(StorageError::InvalidKey(
                "Bucket and key must not be empty".to_string(),
            ));
        }
        if bucket.contains(REFERENCE_SEPARATOR) || key.contains(REFERENCE_SEPARATOR) {
            return Err(StorageError::InvalidKey(format!(
                "Bucket and key must not contain '{}'",
                REFERENCE_SEPARATOR
            )));
        }

        Ok(Self { bucket, key })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Flatten into the persisted `bucket,key` form.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.bucket, REFERENCE_SEPARATOR, self.key)
    }

    /// Parse the persisted form. Exactly one separator with non-empty sides is required.
    pub fn decode(reference: &str) -> StorageResult<Self> {
        let parts: Vec<&str> = reference.split(REFERENCE_SEPARATOR).collect();
        match parts.as_slice() {
            [bucket, key] if !bucket.is_empty() && !key.is_empty() => Ok(Self {
                bucket: (*bucket).to_string(),
                key: (*key).to_string(),
            }),
            [_, _] => Err(StorageError::MalformedReference(
                "Bucket or key is empty".to_string(),
            )),
            _ => Err(StorageError::MalformedReference(format!(
                "Expected exactly one '{}' separator, found {}",
                REFERENCE_SEPARATOR,
                parts.len() - 1
            ))),
        }
    }
}

impl Display for StorageReference {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}{}{}", self.bucket, REFERENCE_SEPARATOR, self.key)
    }
}

impl FromStr for StorageReference {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

/// Mint a time-limited access URL for the referenced object.
///
/// Signing is delegated to the storage provider. Call this on every read:
/// the URL stops working once `ttl` has elapsed.
pub async fn mint_access_url(
    storage: &dyn Storage,
    reference: &StorageReference,
    ttl: Duration,
) -> StorageResult<String> {
    let url = storage.signed_get_url(reference, ttl).await?;

    tracing::debug!(
        backend = storage.backend_name(),
        bucket = %reference.bucket(),
        key = %reference.key(),
        ttl_secs = ttl.as_secs(),
        "Minted access URL"
    );

    Ok(url)
}
