//! Scan command implementation

use anyhow::Result;
use colored::Colorize;

use crate::cli::context::Context;
use crate::editor::CommandRewriter;
use crate::scan;

/// Execute the scan command
pub fn execute(ctx: &Context, array: Option<&str>, installs: bool) -> Result<()> {
    if installs {
        return list_installs(ctx);
    }

    let patterns = &ctx.config.search_patterns;
    let files = match array {
        Some(name) => scan::find_files_with_array(&ctx.repo_root, patterns, Some(name))?,
        None => {
            scan::find_files_with_any(&ctx.repo_root, patterns, &ctx.config.array_names())?
        }
    };

    if files.is_empty() {
        ctx.print_warning(&format!("No files found matching {}", patterns.join(", ")));
        return Ok(());
    }

    match array {
        Some(name) => println!("{}", format!("Files declaring {}:", name).bold()),
        None => println!("{}", "Files declaring configured arrays:".bold()),
    }
    for file in &files {
        println!("  {}", ctx.display_path(file).cyan());
    }

    Ok(())
}

fn list_installs(ctx: &Context) -> Result<()> {
    let rewriter = CommandRewriter::new(&ctx.config.exclusions.pattern, ctx.writer())?;
    let files = scan::find_files_with_installs(
        &ctx.repo_root,
        &ctx.config.search_patterns,
        rewriter.matcher(),
    )?;

    if files.is_empty() {
        ctx.print_warning(&format!(
            "No {} install commands found",
            ctx.config.exclusions.pattern.command
        ));
        return Ok(());
    }

    for file in &files {
        println!("{}", ctx.display_path(file).cyan());
        for (idx, line) in rewriter.find_install_commands(file)? {
            println!("  {} {}", format!("{:>4}:", idx + 1).dimmed(), line.trim());
        }
    }

    Ok(())
}
