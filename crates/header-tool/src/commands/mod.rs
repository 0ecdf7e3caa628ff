//! Command implementations

pub mod deps;
pub mod generate;
pub mod inspect;

pub use deps::print_dependencies;
pub use generate::generate;
pub use inspect::inspect;

use anyhow::{Context, Result};
use header_tool::cache::FileCache;
use header_tool::config::Config;
use header_tool::discovery::{expand_inputs, walk_source_dir, IncludeScanner, WorkingSet};
use header_tool::errors::HeaderToolError;
use header_tool::loader::{CmakeLoader, CodeLoader};
use log::{debug, info};
use sh_reflect::Clazz;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::InputArgs;

/// Gather sources and include directories, then discover the working set.
///
/// `exclude` is the generated file, which is never an input.
pub fn build_working_set(
    input: &InputArgs,
    config: &Config,
    cache: &mut FileCache,
    exclude: Option<&Path>,
) -> Result<WorkingSet> {
    if input.cmake_folder.is_none() && input.files.is_empty() && input.source_dir.is_none() {
        return Err(HeaderToolError::NoInput.into());
    }

    let exclude = exclude.map(absolute).transpose()?;
    let mut sources = Vec::new();
    let mut include_dirs = Vec::new();

    if let Some(build_dir) = &input.cmake_folder {
        let project = input.project.as_deref().ok_or(HeaderToolError::MissingProject)?;
        info!("Processing for project: {}", project);

        let loader = CmakeLoader::new(build_dir, &config.cmake_api_dir)
            .with_exclude(exclude.iter().cloned().collect());
        sources.extend(loader.source_files(project)?);
        include_dirs.extend(loader.include_dirs(project)?);
    }

    sources.extend(expand_inputs(&input.files)?);
    if let Some(dir) = &input.source_dir {
        sources.extend(walk_source_dir(dir, config)?);
    }

    if let Some(out) = &exclude {
        let out = canonical(out);
        sources.retain(|s| canonical(s) != out);
    }

    include_dirs.extend(input.includes.iter().cloned());
    include_dirs.extend(config.include_dirs.iter().cloned());
    debug!("{} source(s), {} include dir(s)", sources.len(), include_dirs.len());

    let scanner = IncludeScanner::new(config, &include_dirs)?;
    scanner.scan(&sources, cache)
}

/// Parse every file of the working set, classes in working-set order.
pub fn extract_classes(set: &WorkingSet, cache: &mut FileCache) -> Result<Vec<Clazz>> {
    let mut classes = Vec::new();

    for item in set.items() {
        let content = cache.read(&item.path)?;
        let found = sh_reflect::extract_source(&content, &item.include)
            .with_context(|| format!("Failed to parse {}", item.path.display()))?;
        classes.extend(found);
    }

    info!("extracted {} class(es) from {} file(s)", classes.len(), set.len());
    Ok(classes)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    Ok(cwd.join(path))
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
