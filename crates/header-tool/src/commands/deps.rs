//! Deps command implementation

use anyhow::Result;
use header_tool::cache::FileCache;
use header_tool::config::Config;

use super::build_working_set;
use crate::cli::InputArgs;

/// Print the working set, one path per line or `;`-joined.
pub fn print_dependencies(input: &InputArgs, inline: bool, config: &Config) -> Result<()> {
    let mut cache = FileCache::new();
    let set = build_working_set(input, config, &mut cache, None)?;

    let paths: Vec<String> = set.paths().map(|p| p.display().to_string()).collect();
    if inline {
        println!("{}", paths.join(";"));
    } else {
        for path in paths {
            println!("{}", path);
        }
    }

    Ok(())
}
