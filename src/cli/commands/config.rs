//! Config command implementation

use anyhow::Result;
use colored::Colorize;

use crate::cli::context::Context;

/// Print the effective configuration
pub fn execute(ctx: &Context) -> Result<()> {
    let source = match &ctx.config_source {
        Some(path) => path.display().to_string(),
        None => "built-in defaults".to_string(),
    };
    println!("{}", format!("# source: {}", source).dimmed());
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}
