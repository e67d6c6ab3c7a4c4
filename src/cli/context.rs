//! Command execution context

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::model::Config;
use crate::utils::path::{absolutize, resolve_in};
use crate::utils::AtomicWriter;

/// Common context for command execution
pub struct Context {
    pub repo_root: PathBuf,
    pub config: Config,
    pub config_source: Option<PathBuf>,
    pub write: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let repo_root = absolutize(&cli.repo_root)?;
        let (mut config, config_source) =
            crate::config::load_config(&repo_root, cli.config.as_deref())?;

        let patterns: Vec<String> = cli
            .patterns
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();
        if !patterns.is_empty() {
            config.search_patterns = patterns;
        }

        if let Some(dir) = &cli.backup_dir {
            config.backup.dir = Some(absolutize(dir)?);
        }

        Ok(Self {
            repo_root,
            config,
            config_source,
            write: cli.write,
        })
    }

    pub fn dry_run(&self) -> bool {
        !self.write
    }

    /// Writer honoring the configured backup directory
    pub fn writer(&self) -> AtomicWriter {
        AtomicWriter::from_config(&self.config.backup)
    }

    /// Resolve a user-supplied script path against the repository root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_in(&self.repo_root, path)
    }

    /// Path shown to the user, relative to the repository root when possible
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.repo_root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Print an error message
    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print how the run was applied
    pub fn print_mode_hint(&self, what: &str) {
        if self.write {
            println!("{} {}", "→".cyan(), format!("{} written to files.", what).dimmed());
        } else {
            println!(
                "{} {}",
                "→".cyan(),
                format!("Dry-run mode: no {} written (use --write to apply).", what).dimmed()
            );
        }
    }
}
