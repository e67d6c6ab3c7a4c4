//! Error types for array and command-line edits

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by single-file edit operations.
///
/// A requested change that is already satisfied is not an error; it is
/// reported through `changed == false` or a zero modification count.
#[derive(Debug, Error)]
pub enum EditError {
    /// The named array is not declared in the file
    #[error("Array {array} not found in {}", path.display())]
    ArrayNotFound { array: String, path: PathBuf },

    /// `NAME=(` was opened but no `)`-only line follows before EOF
    #[error("Array {array} in {} opened on line {line} is not closed with )", path.display())]
    UnterminatedArray {
        array: String,
        path: PathBuf,
        line: usize,
    },

    /// Reading, writing or replacing the file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configured install command could not be turned into a pattern
    #[error("Invalid install pattern for '{command}': {source}")]
    InstallPattern {
        command: String,
        #[source]
        source: regex::Error,
    },

    /// A search pattern could not be compiled
    #[error("Invalid search pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl EditError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        EditError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Attach a file path to errors produced by the text-only editors.
    pub(crate) fn at_path(self, path: &Path) -> Self {
        match self {
            EditError::ArrayNotFound { array, .. } => EditError::ArrayNotFound {
                array,
                path: path.to_path_buf(),
            },
            EditError::UnterminatedArray { array, line, .. } => EditError::UnterminatedArray {
                array,
                path: path.to_path_buf(),
                line,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_array_and_file() {
        let err = EditError::ArrayNotFound {
            array: "FEDORA_PACKAGES".into(),
            path: PathBuf::from("build_files/base.sh"),
        };
        let msg = err.to_string();
        assert!(msg.contains("FEDORA_PACKAGES"));
        assert!(msg.contains("build_files/base.sh"));
    }

    #[test]
    fn test_at_path_rewrites_location() {
        let err = EditError::UnterminatedArray {
            array: "PKGS".into(),
            path: PathBuf::new(),
            line: 3,
        }
        .at_path(Path::new("a.sh"));
        match err {
            EditError::UnterminatedArray { path, line, .. } => {
                assert_eq!(path, PathBuf::from("a.sh"));
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
