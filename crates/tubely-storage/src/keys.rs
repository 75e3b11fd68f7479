//! Asset path generation shared by the thumbnail and video pipelines.
//!
//! An asset path is 32 random bytes encoded as URL-safe base64 without padding,
//! followed by an extension taken from the declared media type:
//! `image/png` gives `.png`, anything that is not exactly `type/subtype` gives `.bin`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use std::sync::Arc;

/// Number of random bytes in an asset identifier (256 bits of entropy)
pub const ASSET_ID_BYTES: usize = 32;

const FALLBACK_EXTENSION: &str = ".bin";

/// Source of cryptographically secure random bytes.
///
/// Injected into [`AssetPathGenerator`] so tests can substitute a deterministic source.
pub trait RandomSource: Send + Sync {
    /// Fill `dest` entirely with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// The thread-local CSPRNG from `rand`, seeded from the operating system.
///
/// Panics when the OS entropy source is unavailable: handing out a predictable
/// identifier is worse than taking the process down.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rand::rng().fill_bytes(dest);
    }
}

/// Generates unguessable asset paths
#[derive(Clone)]
pub struct AssetPathGenerator {
    source: Arc<dyn RandomSource>,
}

impl Default for AssetPathGenerator {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}

impl AssetPathGenerator {
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Generate a fresh asset path such as `Jx3...9w.mp4` for `video/mp4`.
    pub fn new_asset_path(&self, media_type: &str) -> String {
        let mut buf = [0u8; ASSET_ID_BYTES];
        self.source.fill_bytes(&mut buf);
        let id = URL_SAFE_NO_PAD.encode(buf);
        format!("{}{}", id, media_type_to_ext(media_type))
    }
}

/// Map a media type to a file extension including the leading dot.
///
/// The subtype is only used when it is made of URL-safe characters, so the
/// resulting path never needs escaping and never contains the reference separator.
pub fn media_type_to_ext(media_type: &str) -> String {
    let parts: Vec<&str> = media_type.split('/').collect();
    if parts.len() != 2 {
        return FALLBACK_EXTENSION.to_string();
    }

    let (kind, subtype) = (parts[0], parts[1]);
    if kind.is_empty() || subtype.is_empty() || !subtype.chars().all(is_url_safe) {
        return FALLBACK_EXTENSION.to_string();
    }

    format!(".{}", subtype)
}

fn is_url_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~' | '+')
}
