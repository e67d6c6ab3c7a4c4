//! CLI command implementations

pub mod apply;
pub mod backups;
pub mod config;
pub mod edit;
pub mod exclude;
pub mod scan;

use anyhow::Result;

use crate::cli::args::Commands;
use crate::cli::context::Context;

/// Run a subcommand; no subcommand means `scan`
pub fn execute(ctx: &Context, command: Option<&Commands>) -> Result<()> {
    match command {
        None => scan::execute(ctx, None, false),
        Some(Commands::Scan { array, installs }) => {
            scan::execute(ctx, array.as_deref(), *installs)
        }
        Some(Commands::Apply { skip_exclusions }) => apply::execute(ctx, *skip_exclusions),
        Some(Commands::Exclude { packages, file }) => {
            exclude::execute(ctx, packages, file.as_deref())
        }
        Some(Commands::Add {
            file,
            array,
            entries,
        }) => edit::add(ctx, file, array, entries),
        Some(Commands::Remove {
            file,
            array,
            entries,
        }) => edit::remove(ctx, file, array, entries),
        Some(Commands::Config) => config::execute(ctx),
        Some(Commands::Backups) => backups::execute(ctx),
    }
}
