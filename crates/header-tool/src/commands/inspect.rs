//! Inspect command implementation

use anyhow::{Context, Result};
use header_tool::cache::FileCache;
use header_tool::config::Config;

use super::{build_working_set, extract_classes};
use crate::cli::{Format, InputArgs};

/// Dump the extracted model.
pub fn inspect(
    input: &InputArgs,
    format: Format,
    reflected_only: bool,
    config: &Config,
) -> Result<()> {
    let mut cache = FileCache::new();
    let set = build_working_set(input, config, &mut cache, None)?;
    let mut classes = extract_classes(&set, &mut cache)?;

    if reflected_only {
        let marker = config.marker();
        classes.retain(|c| c.has_attribute(&marker));
    }

    let text = match format {
        Format::Json => {
            serde_json::to_string_pretty(&classes).context("Failed to serialize as JSON")?
        }
        Format::Yaml => serde_yaml::to_string(&classes).context("Failed to serialize as YAML")?,
    };
    println!("{}", text);

    Ok(())
}
