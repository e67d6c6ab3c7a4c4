//! Add and remove command implementations

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::cli::context::Context;
use crate::editor::ArrayEditor;
use crate::model::ArrayEditResult;

/// Execute the add command
pub fn add(ctx: &Context, file: &Path, array: &str, entries: &[String]) -> Result<()> {
    let path = ctx.resolve(file);
    let result =
        ArrayEditor::new(ctx.writer()).add_entries(&path, array, entries, ctx.write)?;
    print_result(ctx, &result);
    Ok(())
}

/// Execute the remove command
pub fn remove(ctx: &Context, file: &Path, array: &str, entries: &[String]) -> Result<()> {
    let path = ctx.resolve(file);
    let result =
        ArrayEditor::new(ctx.writer()).remove_entries(&path, array, entries, ctx.write)?;
    print_result(ctx, &result);
    Ok(())
}

fn print_result(ctx: &Context, result: &ArrayEditResult) {
    let location = format!("{}:{}", ctx.display_path(&result.path), result.array);

    if !result.changed {
        ctx.print_success(&format!(
            "{} already up to date ({} entries)",
            location.cyan(),
            result.before_count
        ));
        return;
    }

    let verb = if ctx.write { "Updated" } else { "Would update" };
    ctx.print_success(&format!(
        "{} {}: {} -> {} entries",
        verb,
        location.cyan(),
        result.before_count,
        result.after_count
    ));
    for event in &result.events {
        println!("  {}", event.to_string().dimmed());
    }
}
