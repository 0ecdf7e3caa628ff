//! Build-description loading through the CMake file API.
//!
//! CMake writes a `codemodel-v2-<hash>.json` object to
//! `<build>/.cmake/api/v1/reply` listing every target of every
//! configuration; each target has its own JSON object with its sources and
//! compile groups.

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::CODEMODEL_PREFIX;
use crate::errors::HeaderToolError;

/// Source of a target's files and include directories.
pub trait CodeLoader {
    fn source_files(&self, target: &str) -> Result<Vec<PathBuf>>;
    fn include_dirs(&self, target: &str) -> Result<Vec<PathBuf>>;
}

#[derive(Debug, Deserialize)]
struct CodeModel {
    #[serde(default)]
    paths: Option<CodeModelPaths>,
    configurations: Vec<Configuration>,
}

#[derive(Debug, Deserialize)]
struct CodeModelPaths {
    source: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Configuration {
    #[serde(default)]
    targets: Vec<TargetRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetRef {
    name: String,
    json_file: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TargetModel {
    #[serde(default)]
    sources: Vec<PathEntry>,
    #[serde(default)]
    compile_groups: Vec<CompileGroup>,
}

#[derive(Debug, Deserialize)]
struct CompileGroup {
    #[serde(default)]
    includes: Vec<PathEntry>,
}

#[derive(Debug, Deserialize)]
struct PathEntry {
    path: PathBuf,
}

/// Reads targets from a CMake build tree.
#[derive(Debug, Clone)]
pub struct CmakeLoader {
    reply_dir: PathBuf,
    exclude: Vec<PathBuf>,
}

impl CmakeLoader {
    /// `api_dir` is relative to `build_dir`, normally `.cmake/api/v1/reply`.
    pub fn new(build_dir: impl AsRef<Path>, api_dir: impl AsRef<Path>) -> Self {
        Self { reply_dir: build_dir.as_ref().join(api_dir), exclude: Vec::new() }
    }

    /// Paths never returned as sources, typically the generated file itself.
    pub fn with_exclude(mut self, exclude: Vec<PathBuf>) -> Self {
        self.exclude = exclude;
        self
    }

    fn load_code_model(&self) -> Result<CodeModel> {
        if !self.reply_dir.is_dir() {
            return Err(HeaderToolError::ApiDirNotFound(self.reply_dir.clone()).into());
        }

        let mut candidates: Vec<PathBuf> = fs::read_dir(&self.reply_dir)
            .with_context(|| format!("Failed to list {}", self.reply_dir.display()))?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with(CODEMODEL_PREFIX) && n.ends_with(".json"))
            })
            .collect();
        candidates.sort();

        let Some(path) = candidates.into_iter().next() else {
            return Err(HeaderToolError::CodemodelNotFound(self.reply_dir.clone()).into());
        };
        debug!("codemodel: {}", path.display());

        read_json(&path)
    }

    fn load_target(&self, target: &str) -> Result<(TargetModel, Option<PathBuf>)> {
        let model = self.load_code_model()?;
        let source_root = model.paths.map(|p| p.source);

        let configuration =
            model.configurations.into_iter().next().ok_or(HeaderToolError::NoConfigurations)?;
        let target_ref = configuration
            .targets
            .into_iter()
            .find(|t| t.name == target)
            .ok_or_else(|| HeaderToolError::TargetNotFound(target.to_string()))?;

        let target_path = self.reply_dir.join(&target_ref.json_file);
        if !target_path.is_file() {
            return Err(HeaderToolError::TargetFileNotFound(target_path).into());
        }

        Ok((read_json(&target_path)?, source_root))
    }
}

impl CodeLoader for CmakeLoader {
    /// Relative source paths are resolved against the project source root.
    fn source_files(&self, target: &str) -> Result<Vec<PathBuf>> {
        let (model, source_root) = self.load_target(target)?;

        let sources = model
            .sources
            .into_iter()
            .map(|s| resolve(source_root.as_deref(), s.path))
            .filter(|path| !self.exclude.contains(path))
            .collect::<Vec<_>>();

        debug!("target {}: {} source(s)", target, sources.len());
        Ok(sources)
    }

    /// Include directories of the target's first compile group.
    fn include_dirs(&self, target: &str) -> Result<Vec<PathBuf>> {
        let (model, source_root) = self.load_target(target)?;

        Ok(model
            .compile_groups
            .into_iter()
            .next()
            .map(|group| {
                group.includes.into_iter().map(|i| resolve(source_root.as_deref(), i.path)).collect()
            })
            .unwrap_or_default())
    }
}

fn resolve(root: Option<&Path>, path: PathBuf) -> PathBuf {
    match root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path,
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
