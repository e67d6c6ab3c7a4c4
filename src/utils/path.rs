//! Path and file utilities

use std::path::{Path, PathBuf};

use crate::error::{EditError, Result};

/// Resolve `path` against `root` unless it is already absolute
pub fn resolve_in(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Make `path` absolute against the current directory, dropping `.` parts
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(joined
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect())
}

/// Read a whole script as UTF-8.
///
/// Non-UTF-8 content surfaces as an I/O error with kind `InvalidData`.
pub fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| EditError::io(path, e))
}

/// Directory a temp file for `path` must live in to stay on its filesystem
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_in() {
        assert_eq!(
            resolve_in(Path::new("/repo"), Path::new("build_files/a.sh")),
            PathBuf::from("/repo/build_files/a.sh")
        );
        assert_eq!(
            resolve_in(Path::new("/repo"), Path::new("/etc/a.sh")),
            PathBuf::from("/etc/a.sh")
        );
    }

    #[test]
    fn test_absolutize_drops_cur_dir() {
        let abs = absolutize(Path::new("./build_files/./a.sh")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("build_files/a.sh"));
        assert!(!abs.to_string_lossy().contains("/./"));
    }

    #[test]
    fn test_parent_dir_of_bare_name() {
        assert_eq!(parent_dir(Path::new("a.sh")), Path::new("."));
        assert_eq!(parent_dir(Path::new("dir/a.sh")), Path::new("dir"));
    }

    #[test]
    fn test_read_file_reports_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.sh");
        let err = read_file(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.sh"));
    }

    #[test]
    fn test_read_file_rejects_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bin.sh");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        match read_file(&path).unwrap_err() {
            EditError::Io { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::InvalidData)
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
