//! Writing the generated file

use anyhow::{Context, Result};
use log::{debug, info};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// SHA-256 of `bytes` as lowercase hex.
pub fn checksum(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Compute SHA-256 checksum of a file
pub fn compute_checksum(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(checksum(&bytes))
}

/// Write `content` to `path` unless the file already holds exactly that.
///
/// Returns whether the file was written. Leaving an identical file alone keeps
/// its timestamp, so build systems do not recompile it.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if path.is_file() {
        let existing = compute_checksum(path)?;
        if existing == checksum(content.as_bytes()) {
            debug!("{} is up to date", path.display());
            return Ok(false);
        }
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_checksum_known_value() {
        assert_eq!(
            checksum(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_write_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gen/deep/reflection.cpp");
        assert!(write_if_changed(&path, "x").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "x");
    }

    #[test]
    fn test_unchanged_content_not_rewritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out.cpp");
        assert!(write_if_changed(&path, "same").unwrap());
        assert!(!write_if_changed(&path, "same").unwrap());
        assert!(write_if_changed(&path, "different").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "different");
    }
}
