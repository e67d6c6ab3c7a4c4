//! buildtweak - Build Script Customizer

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildtweak::cli::commands;
use buildtweak::cli::{Cli, Context};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let ctx = Context::from_cli(&cli)?;

    commands::execute(&ctx, cli.command.as_ref())
}
