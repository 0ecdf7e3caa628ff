//! Shadow header tool library
//!
//! Everything the `sht` binary needs around the reflection pipeline: build
//! description loading, include discovery, file caching, configuration and
//! output writing.

pub mod cache;
pub mod config;
pub mod constants;
pub mod discovery;
pub mod errors;
pub mod loader;
pub mod output;

pub use cache::FileCache;
pub use config::Config;
pub use discovery::{IncludeScanner, WorkItem, WorkingSet};
pub use errors::HeaderToolError;
pub use loader::{CmakeLoader, CodeLoader};

/// Re-export common error types
pub use anyhow::{Error, Result};
