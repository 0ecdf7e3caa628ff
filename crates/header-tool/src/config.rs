use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sh_reflect::Marker;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_FILENAME, DEFAULT_CMAKE_API_DIR, DEFAULT_EXTENSIONS};
use crate::errors::HeaderToolError;

/// Application configuration with layered defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Reply directory of the CMake file API, relative to the build tree
    pub cmake_api_dir: PathBuf,

    /// Include directories searched after the target's own
    pub include_dirs: Vec<PathBuf>,

    /// File suffixes that are tokenized
    pub extensions: Vec<String>,

    /// Namespace of the attribute that selects classes and fields
    pub marker_namespace: String,

    /// Name of the attribute that selects classes and fields
    pub marker_name: String,

    /// Runtime header included first by generated code
    pub runtime_header: String,

    /// Whether headers included by discovered headers are scanned as well
    pub follow_includes: bool,
}

impl Default for Config {
    fn default() -> Self {
        let marker = Marker::default();
        Self {
            cmake_api_dir: PathBuf::from(DEFAULT_CMAKE_API_DIR),
            include_dirs: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            marker_namespace: marker.namespace,
            marker_name: marker.name,
            runtime_header: sh_reflect::emit::DEFAULT_RUNTIME_HEADER.to_string(),
            follow_includes: true,
        }
    }
}

impl Config {
    /// Load configuration from all sources with proper precedence.
    ///
    /// An explicit path must exist; otherwise `sht.toml` in `dir` is used
    /// when present.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        let path = match explicit {
            Some(path) if !path.exists() => {
                return Err(HeaderToolError::ConfigNotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => Some(dir.join(CONFIG_FILENAME)).filter(|p| p.exists()),
        };

        if let Some(path) = path {
            config.merge(Self::load_from_file(&path)?);
        }

        Ok(config)
    }

    fn load_from_file(path: &Path) -> Result<PartialConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Merge partial config into this one (partial takes precedence for specified fields)
    fn merge(&mut self, other: PartialConfig) {
        if let Some(val) = other.cmake_api_dir {
            self.cmake_api_dir = val;
        }
        if let Some(val) = other.include_dirs {
            self.include_dirs = val;
        }
        if let Some(val) = other.extensions {
            self.extensions = val;
        }
        if let Some(val) = other.marker_namespace {
            self.marker_namespace = val;
        }
        if let Some(val) = other.marker_name {
            self.marker_name = val;
        }
        if let Some(val) = other.runtime_header {
            self.runtime_header = val;
        }
        if let Some(val) = other.follow_includes {
            self.follow_includes = val;
        }
    }

    pub fn marker(&self) -> Marker {
        Marker::new(&self.marker_namespace, &self.marker_name)
    }

    /// Whether `path` has one of the configured suffixes.
    pub fn is_eligible(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Partial configuration for deserializing from TOML with optional fields
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    cmake_api_dir: Option<PathBuf>,
    include_dirs: Option<Vec<PathBuf>>,
    extensions: Option<Vec<String>>,
    marker_namespace: Option<String>,
    marker_name: Option<String>,
    runtime_header: Option<String>,
    follow_includes: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.cmake_api_dir, PathBuf::from(".cmake/api/v1/reply"));
        assert_eq!(config.extensions, vec!["cpp", "h"]);
        assert_eq!(config.marker(), Marker::new("SH", "Reflect"));
        assert_eq!(config.runtime_header, "reflection.h");
        assert!(config.follow_includes);
        assert!(config.include_dirs.is_empty());
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(None, temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_working_dir() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("sht.toml"),
            r#"
marker_namespace = "Game"
follow_includes = false
extensions = ["h", "hpp"]
"#,
        )
        .unwrap();

        let config = Config::load(None, temp.path()).unwrap();
        assert_eq!(config.marker_namespace, "Game");
        assert_eq!(config.marker_name, "Reflect");
        assert!(!config.follow_includes);
        assert_eq!(config.extensions, vec!["h", "hpp"]);
    }

    #[test]
    fn test_explicit_path_wins() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sht.toml"), "runtime_header = \"a.h\"\n").unwrap();
        let other = temp.path().join("other.toml");
        fs::write(&other, "runtime_header = \"b.h\"\n").unwrap();

        let config = Config::load(Some(&other), temp.path()).unwrap();
        assert_eq!(config.runtime_header, "b.h");
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = Config::load(Some(&missing), temp.path()).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sht.toml"), "marker = \"SH\"\n").unwrap();
        assert!(Config::load(None, temp.path()).is_err());
    }

    #[test]
    fn test_is_eligible() {
        let config = Config::default();
        assert!(config.is_eligible(Path::new("a/b.h")));
        assert!(config.is_eligible(Path::new("main.cpp")));
        assert!(!config.is_eligible(Path::new("shader.glsl")));
        assert!(!config.is_eligible(Path::new("Makefile")));
    }
}
