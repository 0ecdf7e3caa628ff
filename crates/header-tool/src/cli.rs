//! CLI argument parsing

use clap::{Args, Parser, Subcommand, ValueEnum};
use header_tool::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sht", version)]
#[command(about = "Shadow Header Tool: reflection code generator for annotated C++", long_about = None)]
#[command(after_help = "Use 'sht <command> --help' for more information about a command.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Show debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to ./sht.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Where the files to process come from.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Name of the CMake target to process
    #[arg(short, long)]
    pub project: Option<String>,

    /// CMake build directory holding the file-API reply
    #[arg(long = "cmake-folder", value_name = "DIR")]
    pub cmake_folder: Option<PathBuf>,

    /// C++ source or header to process; glob patterns allowed (repeatable)
    #[arg(short, long = "file", value_name = "PATH")]
    pub files: Vec<String>,

    /// Directory searched recursively for C++ sources and headers
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Include directory (repeatable)
    #[arg(short, long = "include", value_name = "DIR")]
    pub includes: Vec<PathBuf>,

    /// Do not scan headers included by discovered headers
    #[arg(long)]
    pub no_follow_includes: bool,
}

impl InputArgs {
    /// Apply flags that override configuration values.
    pub fn apply_to(&self, config: &mut Config) {
        if self.no_follow_includes {
            config.follow_includes = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Yaml,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the reflection registration source
    #[command(visible_alias = "gen")]
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Output file for the generated code
        #[arg(short, long, value_name = "PATH")]
        output: PathBuf,

        /// Print the generated code instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print every file that would be parsed
    #[command(visible_alias = "dependencies")]
    Deps {
        #[command(flatten)]
        input: InputArgs,

        /// Print paths on one line separated by ';'
        #[arg(long)]
        inline: bool,
    },

    /// Print the extracted reflection model
    Inspect {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,

        /// Only classes carrying the reflection marker
        #[arg(long)]
        reflected_only: bool,
    },
}
