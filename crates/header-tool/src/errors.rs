//! Error types and reporting

use colored::*;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions that stop a run before any output is written.
#[derive(Debug, Error)]
pub enum HeaderToolError {
    #[error("No input specified: pass --cmake-folder, --file or --source-dir")]
    NoInput,

    #[error("No project specified: --project is required with --cmake-folder")]
    MissingProject,

    #[error("CMake API directory not found at {}", .0.display())]
    ApiDirNotFound(PathBuf),

    #[error("CMake codemodel file not found in {}", .0.display())]
    CodemodelNotFound(PathBuf),

    #[error("CMake codemodel has no configurations")]
    NoConfigurations,

    #[error("Failed to find project: {0}")]
    TargetNotFound(String),

    #[error("CMake target file not found at {}", .0.display())]
    TargetFileNotFound(PathBuf),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("No files match pattern: {0}")]
    NoMatches(String),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
}

/// Print a formatted error message
pub fn print_error(context: &str, error: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), context);
    eprintln!("  {}", error.to_string().red());

    // Show chain of causes
    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".dimmed(), cause.to_string().dimmed());
    }
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
