//! Backup management module
//!
//! Backups are verbatim copies of a script taken right before it is
//! replaced, named `<file>.<YYYYMMDD-HHMMSS>[.<n>].bak`.

use anyhow::Result;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::model::BackupConfig;

/// Backup entry information
#[derive(Debug, Clone)]
pub struct BackupEntry {
    pub path: PathBuf,
    pub timestamp: String,
    pub filename: String,
    pub size: u64,
}

/// Backup manager
#[derive(Debug, Clone)]
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    /// Manager for the configured directory, if backups are enabled
    pub fn from_config(config: &BackupConfig) -> Option<Self> {
        config.dir.as_ref().map(Self::new)
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Ensure backup directory exists
    fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.backup_dir)?;
        Ok(())
    }

    fn timestamp() -> Result<String> {
        let format = format_description!("[year][month][day]-[hour][minute][second]");
        Ok(OffsetDateTime::now_utc().format(&format)?)
    }

    /// Create a backup of the specified file
    ///
    /// Names are claimed with `create_new`, so two backups taken within the
    /// same second never overwrite each other.
    pub fn create_backup(&self, source_file: &Path) -> Result<PathBuf> {
        self.ensure_dir()?;

        let timestamp = Self::timestamp()?;
        let filename = source_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "script".to_string());

        let mut source = std::fs::File::open(source_file)?;

        for n in 0u32.. {
            let backup_name = if n == 0 {
                format!("{}.{}.bak", filename, timestamp)
            } else {
                format!("{}.{}.{}.bak", filename, timestamp, n)
            };
            let backup_path = self.backup_dir.join(&backup_name);

            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&backup_path)
            {
                Ok(mut target) => {
                    std::io::copy(&mut source, &mut target)?;
                    return Ok(backup_path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }

        anyhow::bail!("No free backup name for {}", source_file.display())
    }

    /// List all backups, newest first
    pub fn list_backups(&self) -> Result<Vec<BackupEntry>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();

        for entry in std::fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().map(|e| e == "bak").unwrap_or(false) {
                let filename = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();

                let Some(timestamp) = extract_timestamp(&filename) else {
                    continue;
                };

                entries.push(BackupEntry {
                    path: path.clone(),
                    timestamp,
                    filename,
                    size: entry.metadata()?.len(),
                });
            }
        }

        entries.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.filename.cmp(&a.filename))
        });

        Ok(entries)
    }
}

/// Pull the `YYYYMMDD-HHMMSS` segment out of a backup file name
fn extract_timestamp(filename: &str) -> Option<String> {
    filename
        .trim_end_matches(".bak")
        .rsplit('.')
        .find(|segment| {
            segment.len() == 15
                && segment.as_bytes()[8] == b'-'
                && segment
                    .bytes()
                    .enumerate()
                    .all(|(i, b)| i == 8 || b.is_ascii_digit())
        })
        .map(str::to_string)
}
