//! Working-set discovery: which files are parsed, and how generated code
//! includes each of them.

use anyhow::{Context, Result};
use log::{debug, warn};
use regex::Regex;
use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::cache::FileCache;
use crate::config::Config;
use crate::errors::HeaderToolError;

/// A file to parse and the text that includes it from generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub path: PathBuf,
    pub include: String,
}

/// Ordered, de-duplicated set of files to parse.
#[derive(Debug, Default)]
pub struct WorkingSet {
    items: Vec<WorkItem>,
    seen: HashSet<PathBuf>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the file is already in the set.
    pub fn insert(&mut self, path: PathBuf, include: String) -> bool {
        let key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if !self.seen.insert(key) {
            return false;
        }
        self.items.push(WorkItem { path, include });
        true
    }

    pub fn items(&self) -> &[WorkItem] {
        &self.items
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.items.iter().map(|item| item.path.as_path())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Finds `#include` directives and resolves them against include directories.
pub struct IncludeScanner<'a> {
    config: &'a Config,
    include_dirs: &'a [PathBuf],
    pattern: Regex,
}

impl<'a> IncludeScanner<'a> {
    pub fn new(config: &'a Config, include_dirs: &'a [PathBuf]) -> Result<Self> {
        let pattern = Regex::new(r#"(?m)^[ \t]*#[ \t]*include[ \t]*[<"]([^<>"\n]+)[>"]"#)
            .context("Failed to compile include pattern")?;
        Ok(Self { config, include_dirs, pattern })
    }

    /// Include texts in order of appearance.
    pub fn includes<'t>(&self, content: &'t str) -> Vec<&'t str> {
        self.pattern
            .captures_iter(content)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .collect()
    }

    /// First include directory containing `include`, if any.
    pub fn resolve(&self, include: &str) -> Option<PathBuf> {
        self.include_dirs.iter().map(|dir| dir.join(include)).find(|path| path.is_file())
    }

    /// Include text for a header given directly as input: its path below the
    /// first include directory containing it, else its file name.
    pub fn include_text_for(&self, path: &Path) -> String {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        self.include_dirs
            .iter()
            .filter_map(|dir| {
                let dir = fs::canonicalize(dir).ok()?;
                canonical.strip_prefix(dir).ok().map(Path::to_path_buf)
            })
            .next()
            .or_else(|| path.file_name().map(PathBuf::from))
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default()
    }

    /// Build the working set for `sources`.
    ///
    /// Headers among the sources are parsed themselves. Every resolved include
    /// of an eligible file joins the set; includes of those headers are
    /// followed when the configuration says so. Ineligible sources are skipped.
    pub fn scan(&self, sources: &[PathBuf], cache: &mut FileCache) -> Result<WorkingSet> {
        let mut set = WorkingSet::new();
        let mut pending: VecDeque<PathBuf> = VecDeque::new();

        for source in sources {
            if !self.config.is_eligible(source) {
                warn!("skipping {}: not a C++ source or header", source.display());
                continue;
            }
            if !source.is_file() {
                warn!("skipping {}: file not found", source.display());
                continue;
            }
            if is_header(source) {
                set.insert(source.clone(), self.include_text_for(source));
            }
            self.scan_file(source, cache, &mut set, &mut pending)?;
        }

        while let Some(header) = pending.pop_front() {
            self.scan_file(&header, cache, &mut set, &mut pending)?;
        }

        debug!("working set: {} file(s)", set.len());
        Ok(set)
    }

    fn scan_file(
        &self,
        path: &Path,
        cache: &mut FileCache,
        set: &mut WorkingSet,
        pending: &mut VecDeque<PathBuf>,
    ) -> Result<()> {
        let content = cache.read(path)?;

        for include in self.includes(&content) {
            let Some(resolved) = self.resolve(include) else {
                debug!("{}: unresolved include {}", path.display(), include);
                continue;
            };
            if !self.config.is_eligible(&resolved) {
                continue;
            }
            if set.insert(resolved.clone(), include.to_string()) && self.config.follow_includes {
                pending.push_back(resolved);
            }
        }

        Ok(())
    }
}

fn is_header(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.starts_with('h'))
}

/// Expand `-f` arguments. Arguments containing glob metacharacters are
/// patterns that must match at least one file; anything else must exist.
pub fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.contains(['*', '?', '[']) {
            let before = files.len();
            files.extend(
                glob::glob(input)
                    .with_context(|| format!("Invalid glob pattern: {}", input))?
                    .flatten()
                    .filter(|p| p.is_file()),
            );
            if files.len() == before {
                return Err(HeaderToolError::NoMatches(input.clone()).into());
            }
        } else {
            let path = PathBuf::from(input);
            if !path.is_file() {
                return Err(HeaderToolError::InputNotFound(path).into());
            }
            files.push(path);
        }
    }

    Ok(files)
}

/// Every eligible file below `dir`, sorted by path.
pub fn walk_source_dir(dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(HeaderToolError::InputNotFound(dir.to_path_buf()).into());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() && config.is_eligible(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
