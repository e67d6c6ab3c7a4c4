//! Configuration loading
//!
//! Lookup order: explicit `--config` path, `<repo_root>/buildtweak.toml`,
//! the per-user config file, then built-in defaults.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::model::Config;

/// Load configuration, returning it together with the file it came from
pub fn load_config(repo_root: &Path, explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        let config = Config::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;
        return Ok((config, Some(path.to_path_buf())));
    }

    for candidate in [Config::repo_config_path(repo_root), Config::user_config_path()] {
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading config");
            let config = Config::load_from(&candidate)
                .with_context(|| format!("Failed to load config {}", candidate.display()))?;
            return Ok((config, Some(candidate)));
        }
    }

    Ok((Config::default(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "search_patterns = [\"x/*.sh\"]\n").unwrap();
        std::fs::write(
            dir.path().join(Config::REPO_FILE_NAME),
            "search_patterns = [\"repo/*.sh\"]\n",
        )
        .unwrap();

        let (config, source) = load_config(dir.path(), Some(&path)).unwrap();
        assert_eq!(config.search_patterns, vec!["x/*.sh"]);
        assert_eq!(source, Some(path));
    }

    #[test]
    fn test_repo_file() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join(Config::REPO_FILE_NAME),
            "search_patterns = [\"repo/*.sh\"]\n",
        )
        .unwrap();

        let (config, source) = load_config(dir.path(), None).unwrap();
        assert_eq!(config.search_patterns, vec!["repo/*.sh"]);
        assert_eq!(source, Some(Config::repo_config_path(dir.path())));
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "search_patterns = 3\n").unwrap();
        let err = load_config(dir.path(), Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("bad.toml"));
    }
}
