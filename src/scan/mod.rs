//! Script discovery
//!
//! Expands glob patterns under a repository root and filters the matching
//! files by what they declare. Unreadable or non-UTF-8 files are skipped
//! here; they only become errors when an edit targets them directly.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::{debug, info};

use crate::error::{EditError, Result};
use crate::parser::array::{declares_any_array, declares_array};
use crate::parser::command::InstallMatcher;

/// Files matching any of `patterns` (relative to `root`), in pattern order,
/// without repeats.
pub fn expand_patterns<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Vec<PathBuf>> {
    let escaped_root = Pattern::escape(&root.to_string_lossy());
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let full = format!("{}/{}", escaped_root.trim_end_matches('/'), pattern);
        let paths = glob::glob(&full).map_err(|source| EditError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    if !files.contains(&path) {
                        files.push(path);
                    }
                }
                Ok(_) => {}
                Err(e) => debug!(error = %e, "skipping unreadable path"),
            }
        }
    }

    Ok(files)
}

/// Contents of every readable candidate file.
fn read_candidates<S: AsRef<str>>(
    root: &Path,
    patterns: &[S],
) -> Result<Vec<(PathBuf, String)>> {
    Ok(expand_patterns(root, patterns)?
        .into_iter()
        .filter_map(|path| match std::fs::read_to_string(&path) {
            Ok(text) => Some((path, text)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "skipping file");
                None
            }
        })
        .collect())
}

/// Files declaring array `name`, or any array at all when `name` is `None`.
pub fn find_files_with_array<S: AsRef<str>>(
    root: &Path,
    patterns: &[S],
    name: Option<&str>,
) -> Result<Vec<PathBuf>> {
    let matches: Vec<PathBuf> = read_candidates(root, patterns)?
        .into_iter()
        .filter(|(_, text)| match name {
            Some(name) => declares_array(text, name),
            None => declares_any_array(text),
        })
        .map(|(path, _)| path)
        .collect();

    info!(
        "Found {} files matching array={}",
        matches.len(),
        name.unwrap_or("*")
    );
    Ok(matches)
}

/// For each name, the files declaring it. Order of `names` is kept.
pub fn find_files_for_arrays<S: AsRef<str>, N: AsRef<str>>(
    root: &Path,
    patterns: &[S],
    names: &[N],
) -> Result<Vec<(String, Vec<PathBuf>)>> {
    let candidates = read_candidates(root, patterns)?;

    let result: Vec<(String, Vec<PathBuf>)> = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let files = candidates
                .iter()
                .filter(|(_, text)| declares_array(text, name))
                .map(|(path, _)| path.clone())
                .collect();
            (name.to_string(), files)
        })
        .collect();

    for (name, files) in &result {
        debug!(array = %name, files = files.len(), "scanned");
    }
    Ok(result)
}

/// Files declaring at least one of `names`, first-seen order.
pub fn find_files_with_any<S: AsRef<str>, N: AsRef<str>>(
    root: &Path,
    patterns: &[S],
    names: &[N],
) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for (_, paths) in find_files_for_arrays(root, patterns, names)? {
        for path in paths {
            if !files.contains(&path) {
                files.push(path);
            }
        }
    }

    info!("Found {} files containing any configured arrays", files.len());
    Ok(files)
}

/// Files containing at least one install command for the matcher's list.
pub fn find_files_with_installs<S: AsRef<str>>(
    root: &Path,
    patterns: &[S],
    matcher: &InstallMatcher,
) -> Result<Vec<PathBuf>> {
    let files: Vec<PathBuf> = read_candidates(root, patterns)?
        .into_iter()
        .filter(|(_, text)| text.lines().any(|line| matcher.is_match(line)))
        .map(|(path, _)| path)
        .collect();

    info!(
        "Found {} files with {} install commands to modify",
        files.len(),
        matcher.pattern().command
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InstallPattern;
    use std::fs;
    use tempfile::tempdir;

    fn repo() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        let scripts = dir.path().join("build_files");
        fs::create_dir_all(scripts.join("nested")).unwrap();
        fs::write(
            scripts.join("base.sh"),
            "FEDORA_PACKAGES=(\n  vim\n)\ndnf -y install ${FEDORA_PACKAGES[@]}\n",
        )
        .unwrap();
        fs::write(
            scripts.join("nested").join("extra.sh"),
            "EXCLUDED_PACKAGES=(firefox)\n",
        )
        .unwrap();
        fs::write(scripts.join("notes.txt"), "FEDORA_PACKAGES=(\n)\n").unwrap();
        fs::write(scripts.join("plain.sh"), "echo hi\n").unwrap();
        dir
    }

    const PATTERNS: &[&str] = &["build_files/**/*.sh"];

    #[test]
    fn test_expand_patterns_recursive() {
        let dir = repo();
        let files = expand_patterns(dir.path(), PATTERNS).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.extension().unwrap() == "sh"));
    }

    #[test]
    fn test_expand_patterns_dedup() {
        let dir = repo();
        let patterns = ["build_files/*.sh", "build_files/**/*.sh"];
        let files = expand_patterns(dir.path(), &patterns).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = repo();
        let err = expand_patterns(dir.path(), &["build_files/[.sh"]).unwrap_err();
        assert!(matches!(err, EditError::Pattern { .. }));
    }

    #[test]
    fn test_find_files_with_array() {
        let dir = repo();
        let named =
            find_files_with_array(dir.path(), PATTERNS, Some("FEDORA_PACKAGES")).unwrap();
        assert_eq!(named, vec![dir.path().join("build_files/base.sh")]);

        let any = find_files_with_array(dir.path(), PATTERNS, None).unwrap();
        assert_eq!(any.len(), 2);
    }

    #[test]
    fn test_find_files_for_arrays_and_any() {
        let dir = repo();
        let names = ["FEDORA_PACKAGES", "EXCLUDED_PACKAGES", "MISSING"];
        let mapping = find_files_for_arrays(dir.path(), PATTERNS, &names).unwrap();
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping[0].1.len(), 1);
        assert_eq!(
            mapping[1].1,
            vec![dir.path().join("build_files/nested/extra.sh")]
        );
        assert!(mapping[2].1.is_empty());

        let any = find_files_with_any(dir.path(), PATTERNS, &names).unwrap();
        assert_eq!(any.len(), 2);
    }

    #[test]
    fn test_find_files_with_installs() {
        let dir = repo();
        let matcher = InstallMatcher::new(&InstallPattern::default()).unwrap();
        let files = find_files_with_installs(dir.path(), PATTERNS, &matcher).unwrap();
        assert_eq!(files, vec![dir.path().join("build_files/base.sh")]);
    }
}
