//! Edit results and diagnostic events
//!
//! Every edit returns a result record together with the list of events it
//! produced, so callers can report progress in whatever format they use.

use std::fmt;
use std::path::PathBuf;

/// A single recorded step of an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditEvent {
    /// Array declaration found (0-based line index)
    ArrayLocated { line: usize, inline: bool },
    /// Existing entries counted after normalization
    EntriesParsed { count: usize },
    EntriesAdded { entries: Vec<String> },
    EntriesRemoved { entries: Vec<String> },
    /// Requested change already satisfied
    NothingToDo,
    /// Install command rewritten (0-based line index)
    LineRewritten {
        line: usize,
        before: String,
        after: String,
    },
    /// Changes computed but not written
    DryRun,
    FileWritten { path: PathBuf },
    BackupCreated { path: PathBuf },
    BackupFailed { reason: String },
}

impl fmt::Display for EditEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditEvent::ArrayLocated { line, inline } => {
                let form = if *inline { "inline" } else { "block" };
                write!(f, "found {} array on line {}", form, line + 1)
            }
            EditEvent::EntriesParsed { count } => write!(f, "{} existing entries", count),
            EditEvent::EntriesAdded { entries } => write!(f, "add: {}", entries.join(", ")),
            EditEvent::EntriesRemoved { entries } => write!(f, "remove: {}", entries.join(", ")),
            EditEvent::NothingToDo => write!(f, "nothing to do"),
            EditEvent::LineRewritten {
                line,
                before,
                after,
            } => write!(f, "line {}: {} -> {}", line + 1, before.trim(), after.trim()),
            EditEvent::DryRun => write!(f, "dry-run, not written"),
            EditEvent::FileWritten { path } => write!(f, "wrote {}", path.display()),
            EditEvent::BackupCreated { path } => write!(f, "backup {}", path.display()),
            EditEvent::BackupFailed { reason } => write!(f, "backup failed: {}", reason),
        }
    }
}

/// Outcome of adding to or removing from one array in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayEditResult {
    pub path: PathBuf,
    pub array: String,
    pub changed: bool,
    pub before_count: usize,
    pub after_count: usize,
    pub events: Vec<EditEvent>,
}

impl fmt::Display for ArrayEditResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: changed={} before={} after={}",
            self.array, self.changed, self.before_count, self.after_count
        )
    }
}

/// Outcome of rewriting install commands in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub path: PathBuf,
    pub modified_count: usize,
    pub message: String,
    pub events: Vec<EditEvent>,
}

impl RewriteResult {
    pub fn changed(&self) -> bool {
        self.modified_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_display_uses_one_based_lines() {
        let event = EditEvent::ArrayLocated {
            line: 0,
            inline: false,
        };
        assert_eq!(event.to_string(), "found block array on line 1");
    }

    #[test]
    fn test_array_result_display() {
        let result = ArrayEditResult {
            path: PathBuf::from("a.sh"),
            array: "PKGS".into(),
            changed: true,
            before_count: 2,
            after_count: 3,
            events: Vec::new(),
        };
        assert_eq!(result.to_string(), "PKGS: changed=true before=2 after=3");
    }
}
