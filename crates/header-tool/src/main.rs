//! Shadow header tool CLI

use anyhow::{Context, Result};
use clap::Parser;
use header_tool::config::Config;
use header_tool::constants::banner;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    if !cli.no_banner {
        eprintln!("{}", banner());
    }

    if let Err(e) = run(cli) {
        header_tool::errors::print_error("Command failed", &e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let mut config = Config::load(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Generate { input, output, dry_run } => {
            input.apply_to(&mut config);
            generate(&input, &output, dry_run, &config)
        }
        Commands::Deps { input, inline } => {
            input.apply_to(&mut config);
            print_dependencies(&input, inline, &config)
        }
        Commands::Inspect { input, format, reflected_only } => {
            input.apply_to(&mut config);
            inspect(&input, format, reflected_only, &config)
        }
    }
}

/// `RUST_LOG` wins over the verbosity flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
