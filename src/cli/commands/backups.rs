//! Backups command implementation

use anyhow::Result;
use colored::Colorize;

use crate::backup::BackupManager;
use crate::cli::context::Context;

/// List backups in the configured directory
pub fn execute(ctx: &Context) -> Result<()> {
    let Some(manager) = BackupManager::from_config(&ctx.config.backup) else {
        ctx.print_warning("No backup directory configured (use --backup-dir or [backup] dir).");
        return Ok(());
    };

    let backups = manager.list_backups()?;

    if backups.is_empty() {
        println!("{}", "No backups found.".dimmed());
        return Ok(());
    }

    println!(
        "{:<48} {:<16} {}",
        "FILE".bold().cyan(),
        "TIMESTAMP".bold().cyan(),
        "SIZE".bold().cyan()
    );
    println!("{}", "─".repeat(72).dimmed());

    for backup in &backups {
        println!(
            "{:<48} {:<16} {}",
            backup.filename.white(),
            backup.timestamp.dimmed(),
            format_size(backup.size).dimmed()
        );
    }

    println!();
    println!("{}", format!("Total: {} backup(s)", backups.len()).dimmed());

    Ok(())
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
