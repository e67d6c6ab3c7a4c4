//! Apply command implementation

use anyhow::Result;
use colored::Colorize;

use super::exclude::print_exclusion_report;
use crate::batch::{self, BatchFailure};
use crate::cli::context::Context;

/// Execute the apply command: exclusions first, then removals and additions
pub fn execute(ctx: &Context, skip_exclusions: bool) -> Result<()> {
    if !skip_exclusions {
        let report = batch::apply_exclusions(&ctx.repo_root, &ctx.config, ctx.dry_run())?;
        print_exclusion_report(ctx, &report);
    }

    let report = batch::apply_defaults(&ctx.repo_root, &ctx.config, ctx.dry_run())?;

    if report.results.is_empty() {
        ctx.print_warning("No files contain the configured arrays.");
        return Ok(());
    }

    for (path, edits) in &report.results {
        println!("{}", ctx.display_path(path).cyan());
        for edit in edits {
            let marker = if edit.changed {
                "~".yellow()
            } else {
                "=".dimmed()
            };
            println!(
                "  {} {} before={} after={}",
                marker,
                edit.array.bold(),
                edit.before_count,
                edit.after_count
            );
        }
    }

    print_failures(ctx, &report.failures);
    ctx.print_mode_hint("array changes");

    Ok(())
}

/// Report per-file failures without failing the run
pub fn print_failures(ctx: &Context, failures: &[BatchFailure]) {
    for failure in failures {
        let what = match &failure.array {
            Some(array) => format!("{} {}", failure.step, array),
            None => failure.step.to_string(),
        };
        ctx.print_error(&format!(
            "{} ({}): {}",
            ctx.display_path(&failure.path),
            what,
            failure.error
        ));
    }
}
