//! Exclude command implementation

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use super::apply::print_failures;
use crate::batch::{self, ExclusionReport};
use crate::cli::context::Context;
use crate::editor::CommandRewriter;

/// Execute the exclude command
pub fn execute(ctx: &Context, packages: &[String], file: Option<&Path>) -> Result<()> {
    let packages: &[String] = if packages.is_empty() {
        &ctx.config.exclusions.packages
    } else {
        packages
    };

    match file {
        Some(file) => {
            let path = ctx.resolve(file);
            let rewriter =
                CommandRewriter::new(&ctx.config.exclusions.pattern, ctx.writer())?;
            let result = rewriter.add_exclusions(&path, packages, ctx.write)?;
            println!("{}: {}", ctx.display_path(&path).cyan(), result.message);
            for event in &result.events {
                println!("  {}", event.to_string().dimmed());
            }
        }
        None => {
            let report = batch::apply_exclusions_with(
                &ctx.repo_root,
                &ctx.config,
                packages,
                ctx.dry_run(),
            )?;
            print_exclusion_report(ctx, &report);
        }
    }

    Ok(())
}

/// Print a summary of an exclusion batch
pub fn print_exclusion_report(ctx: &Context, report: &ExclusionReport) {
    if report.results.is_empty() && report.failures.is_empty() {
        ctx.print_warning(&format!(
            "No files found with {} install commands to modify.",
            ctx.config.exclusions.pattern.command
        ));
        return;
    }

    println!(
        "{}",
        format!("Applied exclusions to {} file(s):", report.results.len()).bold()
    );
    for (path, result) in &report.results {
        println!("  {}: {}", ctx.display_path(path).cyan(), result.message);
    }
    print_failures(ctx, &report.failures);
    ctx.print_mode_hint("exclusion changes");
}
