//! Atomic file replacement
//!
//! Content goes to a temp file next to the target and is renamed over it,
//! so readers see either the old or the new file, never a partial one.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::path::parent_dir;
use crate::backup::BackupManager;
use crate::error::{EditError, Result};
use crate::model::{BackupConfig, EditEvent};

/// Write-temp-then-rename writer with optional backups.
#[derive(Debug, Clone, Default)]
pub struct AtomicWriter {
    backup: Option<BackupManager>,
}

impl AtomicWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backup(backup: BackupManager) -> Self {
        Self {
            backup: Some(backup),
        }
    }

    pub fn from_config(config: &BackupConfig) -> Self {
        Self {
            backup: BackupManager::from_config(config),
        }
    }

    pub fn backup(&self) -> Option<&BackupManager> {
        self.backup.as_ref()
    }

    /// Replace `path` with `content`.
    pub fn write(&self, path: &Path, content: &str) -> Result<Vec<EditEvent>> {
        self.write_with(path, |file| file.write_all(content.as_bytes()))
    }

    /// Replace `path` with whatever `fill` writes into the temp file.
    ///
    /// If `fill` fails the temp file is discarded and `path` is untouched.
    pub fn write_with<F>(&self, path: &Path, fill: F) -> Result<Vec<EditEvent>>
    where
        F: FnOnce(&mut File) -> std::io::Result<()>,
    {
        let mut events = Vec::new();

        let mut tmp =
            NamedTempFile::new_in(parent_dir(path)).map_err(|e| EditError::io(path, e))?;
        fill(tmp.as_file_mut()).map_err(|e| EditError::io(path, e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| EditError::io(path, e))?;

        // Best effort: keep the script's mode (executable bit)
        if let Ok(meta) = std::fs::metadata(path) {
            if let Err(e) = std::fs::set_permissions(tmp.path(), meta.permissions()) {
                debug!(path = %path.display(), error = %e, "could not copy permissions");
            }
        }

        if let Some(backup) = &self.backup {
            if path.exists() {
                match backup.create_backup(path) {
                    Ok(backup_path) => {
                        info!(backup = %backup_path.display(), "wrote backup");
                        events.push(EditEvent::BackupCreated { path: backup_path });
                    }
                    Err(e) => {
                        let reason = format!("{e:#}");
                        warn!(
                            dir = %backup.backup_dir().display(),
                            error = %reason,
                            "failed to write backup"
                        );
                        events.push(EditEvent::BackupFailed { reason });
                    }
                }
            }
        }

        tmp.persist(path).map_err(|e| EditError::io(path, e.error))?;
        debug!(path = %path.display(), "replaced file");
        events.push(EditEvent::FileWritten {
            path: path.to_path_buf(),
        });

        Ok(events)
    }
}
