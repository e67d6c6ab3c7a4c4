//! CLI argument definitions using Clap

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "buildtweak")]
#[command(
    about = "Build script customizer - edit package arrays and install commands in shell scripts"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Repository root (defaults to $GITHUB_WORKSPACE or the current directory)
    #[arg(long, global = true, env = "GITHUB_WORKSPACE", default_value = ".")]
    pub repo_root: PathBuf,

    /// Configuration file (defaults to <repo-root>/buildtweak.toml, then the user config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Comma-separated glob patterns limiting the files searched
    /// (e.g. 'build_files/**/*.sh,mods/**/*.sh')
    #[arg(long, global = true, value_delimiter = ',')]
    pub patterns: Vec<String>,

    /// Directory where timestamped backups are written before files are replaced
    #[arg(long, global = true)]
    pub backup_dir: Option<PathBuf>,

    /// Write changes to files. Without it every command is a dry run
    #[arg(long, global = true)]
    pub write: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List files declaring the configured arrays (default command)
    ///
    /// Running without a subcommand only lists files. It does not preview
    /// install exclusions first; use `apply` (a dry run without `--write`)
    /// for that.
    #[command(visible_alias = "ls")]
    Scan {
        /// Only files declaring this array
        #[arg(long)]
        array: Option<String>,
        /// List install command lines instead of arrays
        #[arg(long)]
        installs: bool,
    },

    /// Apply install exclusions, then configured removals and additions
    Apply {
        /// Skip install command exclusion rewrites
        #[arg(long, alias = "skip-dnf-exclusions")]
        skip_exclusions: bool,
    },

    /// Add --exclude flags to install commands
    Exclude {
        /// Packages to exclude (defaults to the configured list)
        #[arg(long, value_delimiter = ',')]
        packages: Vec<String>,
        /// Rewrite only this file instead of searching the repository
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Add entries to an array in one file
    Add {
        /// Script to edit
        file: PathBuf,
        /// Array name
        array: String,
        /// Entries to add
        #[arg(required = true)]
        entries: Vec<String>,
    },

    /// Remove entries from an array in one file
    #[command(visible_alias = "rm")]
    Remove {
        /// Script to edit
        file: PathBuf,
        /// Array name
        array: String,
        /// Entries to remove (unquoted)
        #[arg(required = true)]
        entries: Vec<String>,
    },

    /// Print the effective configuration as TOML
    Config,

    /// List backups in the backup directory
    Backups,
}
