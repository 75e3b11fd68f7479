//! Video inspection and preparation backed by the ffmpeg tool suite

mod classifier;
mod faststart;
mod probe;

pub use classifier::MediaClassifier;
pub use faststart::{FfmpegFaststart, PROCESSING_SUFFIX};
pub use probe::FfprobeProber;

/// Reject paths carrying shell metacharacters or traversal sequences
pub(crate) fn validate_path(path: &str) -> Result<(), String> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(format!("Path contains dangerous characters: {}", path));
    }

    if path.contains("..") {
        return Err(format!("Path contains directory traversal: {}", path));
    }

    Ok(())
}

/// Tool paths are further restricted to a plain character set
pub(crate) fn validate_tool_path(path: &str) -> Result<(), String> {
    validate_path(path)?;

    if path.is_empty()
        || !path.chars().all(|c| {
            c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
        })
    {
        return Err(format!("Tool path contains unsafe characters: {}", path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("/tmp/tubely-uploadAb12.mp4").is_ok());
        assert!(validate_path("/tmp/a;rm -rf.mp4").is_err());
        assert!(validate_path("/tmp/$(whoami).mp4").is_err());
        assert!(validate_path("/tmp/../etc/passwd").is_err());
    }

    #[test]
    fn test_validate_tool_path() {
        assert!(validate_tool_path("ffprobe").is_ok());
        assert!(validate_tool_path("/usr/local/bin/ffmpeg").is_ok());
        assert!(validate_tool_path("ffmpeg -y").is_err());
        assert!(validate_tool_path("").is_err());
    }
}
