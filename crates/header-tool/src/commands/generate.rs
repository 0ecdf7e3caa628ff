//! Generate command implementation

use anyhow::Result;
use colored::*;
use header_tool::cache::FileCache;
use header_tool::config::Config;
use header_tool::errors::print_warning;
use header_tool::output::write_if_changed;
use sh_reflect::ReflectionWriter;
use std::path::Path;

use super::{build_working_set, extract_classes};
use crate::cli::InputArgs;

/// Run the whole pipeline and write (or print) the generated code.
///
/// Nothing is written unless every file parsed.
pub fn generate(input: &InputArgs, output: &Path, dry_run: bool, config: &Config) -> Result<()> {
    let mut cache = FileCache::new();
    let set = build_working_set(input, config, &mut cache, Some(output))?;
    let classes = extract_classes(&set, &mut cache)?;

    let writer = ReflectionWriter::new(config.marker(), &config.runtime_header);
    let reflected = classes.iter().filter(|c| c.has_attribute(writer.marker())).count();
    if reflected == 0 {
        print_warning(&format!(
            "No classes marked [[{}::{}]] in {} file(s)",
            config.marker_namespace,
            config.marker_name,
            set.len()
        ));
    }

    let content = writer.render(&classes);

    if dry_run {
        print!("{}", content);
        return Ok(());
    }

    if write_if_changed(output, &content)? {
        println!(
            "{} Generated {} ({} class(es))",
            "✓".green().bold(),
            output.display(),
            reflected
        );
    } else {
        println!("{} {} is up to date", "✓".green().bold(), output.display());
    }

    Ok(())
}
