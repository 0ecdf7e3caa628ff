//! Whole-file content cache

use anyhow::{Context, Result};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Reads each distinct path at most once per run.
#[derive(Debug, Default)]
pub struct FileCache {
    files: HashMap<PathBuf, Rc<str>>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<Rc<str>> {
        let path = path.as_ref();
        if let Some(content) = self.files.get(path) {
            return Ok(Rc::clone(content));
        }

        let content: Rc<str> = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
            .into();
        debug!("read {} ({} bytes)", path.display(), content.len());

        self.files.insert(path.to_path_buf(), Rc::clone(&content));
        Ok(content)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
