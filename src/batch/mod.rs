//! Applying configured edits across many scripts.
//!
//! Files are processed one after another. A failure on one file is logged
//! and recorded in the report; the remaining files are still processed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::editor::{ArrayEditor, CommandRewriter};
use crate::error::{EditError, Result};
use crate::model::{ArrayEditResult, Config, RewriteResult};
use crate::scan;
use crate::utils::AtomicWriter;

/// Which operation failed for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStep {
    Remove,
    Add,
    Exclude,
}

impl std::fmt::Display for BatchStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchStep::Remove => write!(f, "remove"),
            BatchStep::Add => write!(f, "add"),
            BatchStep::Exclude => write!(f, "exclude"),
        }
    }
}

/// A per-file failure that did not stop the batch
#[derive(Debug)]
pub struct BatchFailure {
    pub path: PathBuf,
    /// Array name, `None` for install-command rewrites
    pub array: Option<String>,
    pub step: BatchStep,
    pub error: EditError,
}

/// Outcome of [`apply_defaults`]
#[derive(Debug, Default)]
pub struct DefaultsReport {
    pub results: BTreeMap<PathBuf, Vec<ArrayEditResult>>,
    pub failures: Vec<BatchFailure>,
}

impl DefaultsReport {
    pub fn changed_count(&self) -> usize {
        self.results.values().flatten().filter(|r| r.changed).count()
    }
}

/// Outcome of [`apply_exclusions`]
#[derive(Debug, Default)]
pub struct ExclusionReport {
    pub results: BTreeMap<PathBuf, RewriteResult>,
    pub failures: Vec<BatchFailure>,
}

impl ExclusionReport {
    pub fn modified_count(&self) -> usize {
        self.results.values().map(|r| r.modified_count).sum()
    }
}

/// Apply configured removals, then additions, to every file declaring a
/// configured array.
///
/// Only pattern errors abort; per-file errors land in `failures`.
pub fn apply_defaults(root: &Path, config: &Config, dry_run: bool) -> Result<DefaultsReport> {
    let editor = ArrayEditor::new(AtomicWriter::from_config(&config.backup));
    let names = config.array_names();
    let mapping = scan::find_files_for_arrays(root, &config.search_patterns, &names)?;
    let mut report = DefaultsReport::default();

    for (array, files) in mapping {
        for path in files {
            let results = report.results.entry(path.clone()).or_default();

            if let Some(entries) = config.removals.get(&array) {
                match editor.remove_entries(&path, &array, entries, !dry_run) {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        error!(
                            "Error removing entries for {} in {}: {}",
                            array,
                            path.display(),
                            e
                        );
                        report.failures.push(BatchFailure {
                            path: path.clone(),
                            array: Some(array.clone()),
                            step: BatchStep::Remove,
                            error: e,
                        });
                    }
                }
            }

            if let Some(entries) = config.additions.get(&array) {
                match editor.add_entries(&path, &array, entries, !dry_run) {
                    Ok(result) => results.push(result),
                    Err(e) => {
                        error!(
                            "Error adding entries for {} in {}: {}",
                            array,
                            path.display(),
                            e
                        );
                        report.failures.push(BatchFailure {
                            path: path.clone(),
                            array: Some(array.clone()),
                            step: BatchStep::Add,
                            error: e,
                        });
                    }
                }
            }
        }
    }

    info!(
        "apply_defaults completed (dry_run={}). Processed {} files.",
        dry_run,
        report.results.len()
    );
    Ok(report)
}

/// Add the configured exclusion flags to every file with install commands.
pub fn apply_exclusions(root: &Path, config: &Config, dry_run: bool) -> Result<ExclusionReport> {
    apply_exclusions_with(root, config, &config.exclusions.packages, dry_run)
}

/// [`apply_exclusions`] with an explicit package list.
pub fn apply_exclusions_with<S: AsRef<str>>(
    root: &Path,
    config: &Config,
    packages: &[S],
    dry_run: bool,
) -> Result<ExclusionReport> {
    let mut report = ExclusionReport::default();

    if packages.is_empty() {
        warn!("No exclusion packages configured");
        return Ok(report);
    }

    let writer = AtomicWriter::from_config(&config.backup);
    let rewriter = CommandRewriter::new(&config.exclusions.pattern, writer)?;
    let files =
        scan::find_files_with_installs(root, &config.search_patterns, rewriter.matcher())?;

    for path in files {
        match rewriter.add_exclusions(&path, packages, !dry_run) {
            Ok(result) => {
                info!("{}: {}", path.display(), result.message);
                report.results.insert(path, result);
            }
            Err(e) => {
                error!("Error adding exclusions in {}: {}", path.display(), e);
                report.failures.push(BatchFailure {
                    path,
                    array: None,
                    step: BatchStep::Exclude,
                    error: e,
                });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    fn small_config() -> Config {
        let mut additions = BTreeMap::new();
        additions.insert("PKGS".to_string(), vec!["tmux".to_string()]);
        let mut removals = BTreeMap::new();
        removals.insert("PKGS".to_string(), vec!["nano".to_string()]);
        Config {
            search_patterns: vec!["*.sh".into()],
            additions,
            removals,
            ..Config::default()
        }
    }

    #[test]
    fn test_defaults_remove_then_add() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("a.sh");
        fs::write(&script, "PKGS=(\n  nano\n  vim\n)\n").unwrap();

        let report = apply_defaults(dir.path(), &small_config(), false).unwrap();

        assert!(report.failures.is_empty());
        let results = &report.results[&script];
        assert_eq!(results.len(), 2);
        assert_eq!((results[0].before_count, results[0].after_count), (2, 1));
        assert_eq!((results[1].before_count, results[1].after_count), (1, 2));
        assert_eq!(
            fs::read_to_string(&script).unwrap(),
            "PKGS=(\n  vim\n  tmux\n)\n"
        );
    }

    #[test]
    fn test_defaults_dry_run_leaves_files() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("a.sh");
        fs::write(&script, "PKGS=(\n  nano\n)\n").unwrap();

        let report = apply_defaults(dir.path(), &small_config(), true).unwrap();

        assert_eq!(report.changed_count(), 2);
        assert_eq!(fs::read_to_string(&script).unwrap(), "PKGS=(\n  nano\n)\n");
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.sh"), "PKGS=(\n  nano\n").unwrap();
        let good = dir.path().join("b.sh");
        fs::write(&good, "PKGS=(\n  nano\n)\n").unwrap();

        let report = apply_defaults(dir.path(), &small_config(), false).unwrap();

        assert_eq!(report.failures.len(), 2);
        assert!(report
            .failures
            .iter()
            .all(|f| matches!(f.error, EditError::UnterminatedArray { .. })));
        // Nothing left to take indentation from after the removal
        assert_eq!(fs::read_to_string(&good).unwrap(), "PKGS=(\ntmux\n)\n");
    }

    #[test]
    fn test_exclusions() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("build_files").join("a.sh");
        fs::create_dir_all(script.parent().unwrap()).unwrap();
        fs::write(&script, "dnf -y install ${FEDORA_PACKAGES[@]}\n").unwrap();

        let report = apply_exclusions(dir.path(), &Config::default(), false).unwrap();

        assert_eq!(report.modified_count(), 1);
        assert_eq!(
            fs::read_to_string(&script).unwrap(),
            "dnf -y install --exclude=fedora-logos ${FEDORA_PACKAGES[@]}\n"
        );
    }

    #[test]
    fn test_exclusions_empty_packages() {
        let dir = tempdir().unwrap();
        let none: &[String] = &[];
        let report = apply_exclusions_with(dir.path(), &Config::default(), none, false).unwrap();
        assert!(report.results.is_empty());
    }
}
