//! Adding and removing entries of a bash array declaration.
//!
//! The text functions ([`add_entries_to_text`], [`remove_entries_from_text`])
//! hold the whole algorithm and never touch the filesystem. [`ArrayEditor`]
//! wraps them with reading, dry-run handling and atomic replacement.
//!
//! Formatting rules:
//! - block arrays get new entries as `indent + entry` right before `)`
//! - inline arrays are rewritten on their own line as `(tok tok ...)`
//! - every untouched line is kept byte for byte

use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EditError, Result};
use crate::model::{ArrayEditResult, EditEvent};
use crate::parser::array::{
    find_array_start, normalize_entry, parse_array_block, ArrayBlock, ArrayForm,
};
use crate::utils::path::read_file;
use crate::utils::strings::{join_lines, split_lines};
use crate::utils::AtomicWriter;

/// Computed change to one array, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayEdit {
    /// Full new file content, `None` when nothing changes
    pub new_content: Option<String>,
    pub before_count: usize,
    pub after_count: usize,
    pub events: Vec<EditEvent>,
}

impl ArrayEdit {
    pub fn changed(&self) -> bool {
        self.new_content.is_some()
    }

    fn unchanged(count: usize, mut events: Vec<EditEvent>) -> Self {
        events.push(EditEvent::NothingToDo);
        Self {
            new_content: None,
            before_count: count,
            after_count: count,
            events,
        }
    }
}

/// Find and parse `name`. Errors carry no path; callers attach it.
fn locate(lines: &[&str], name: &str) -> Result<(ArrayBlock, Vec<EditEvent>)> {
    let Some(start) = find_array_start(lines, name) else {
        return Err(EditError::ArrayNotFound {
            array: name.to_string(),
            path: Default::default(),
        });
    };

    let Some(block) = parse_array_block(lines, start, name) else {
        return Err(EditError::UnterminatedArray {
            array: name.to_string(),
            path: Default::default(),
            line: start + 1,
        });
    };

    let events = vec![
        EditEvent::ArrayLocated {
            line: start,
            inline: block.is_inline(),
        },
        EditEvent::EntriesParsed {
            count: block.normalized_entries().len(),
        },
    ];
    Ok((block, events))
}

/// Rebuild the file with `entries` as the array's new raw content.
fn splice(lines: &[&str], block: &ArrayBlock, entries: &[String]) -> String {
    match block.form {
        ArrayForm::Inline { open, close } => {
            let line = lines[block.start];
            let rewritten = format!(
                "{}({}){}",
                &line[..open],
                entries.join(" "),
                &line[close..]
            );
            join_lines(
                lines[..block.start]
                    .iter()
                    .map(|l| l.to_string())
                    .chain(std::iter::once(rewritten))
                    .chain(lines[block.start + 1..].iter().map(|l| l.to_string())),
            )
        }
        ArrayForm::Block => join_lines(
            lines[..=block.start]
                .iter()
                .map(|l| l.to_string())
                .chain(entries.iter().cloned())
                .chain(lines[block.end..].iter().map(|l| l.to_string())),
        ),
    }
}

/// Append entries that are not already present.
///
/// Presence is checked against normalized existing entries. Requested
/// entries are inserted verbatim; repeats inside `entries` are kept.
pub fn add_entries_to_text<S: AsRef<str>>(
    content: &str,
    name: &str,
    entries: &[S],
) -> Result<ArrayEdit> {
    let lines = split_lines(content);
    let (block, mut events) = locate(&lines, name)?;

    let existing = block.normalized_entries();
    let before_count = existing.len();

    let additions: Vec<String> = entries
        .iter()
        .map(|e| e.as_ref())
        .filter(|e| !existing.iter().any(|x| x == e))
        .map(str::to_string)
        .collect();

    if additions.is_empty() {
        return Ok(ArrayEdit::unchanged(before_count, events));
    }

    let mut new_entries = block.entries.clone();
    for entry in &additions {
        new_entries.push(format!("{}{}", block.indent, entry));
    }

    let after_count = before_count + additions.len();
    events.push(EditEvent::EntriesAdded { entries: additions });

    Ok(ArrayEdit {
        new_content: Some(splice(&lines, &block, &new_entries)),
        before_count,
        after_count,
        events,
    })
}

/// Drop raw lines (or inline tokens) whose normalized form is requested.
///
/// The removal set is compared as given; pass unquoted tokens. Comments and
/// blank lines always survive.
pub fn remove_entries_from_text<S: AsRef<str>>(
    content: &str,
    name: &str,
    entries: &[S],
) -> Result<ArrayEdit> {
    let lines = split_lines(content);
    let (block, mut events) = locate(&lines, name)?;

    let before_count = block.normalized_entries().len();
    let to_remove: HashSet<&str> = entries.iter().map(|e| e.as_ref()).collect();

    let mut kept = Vec::with_capacity(block.entries.len());
    let mut removed = Vec::new();
    for raw in &block.entries {
        match normalize_entry(raw) {
            Some(norm) if to_remove.contains(norm.as_str()) => removed.push(norm),
            _ => kept.push(raw.clone()),
        }
    }

    if removed.is_empty() {
        return Ok(ArrayEdit::unchanged(before_count, events));
    }

    let after_count = before_count - removed.len();
    let new_content = splice(&lines, &block, &kept);
    events.push(EditEvent::EntriesRemoved { entries: removed });

    Ok(ArrayEdit {
        new_content: Some(new_content),
        before_count,
        after_count,
        events,
    })
}

/// File-level array editor.
#[derive(Debug, Clone, Default)]
pub struct ArrayEditor {
    writer: AtomicWriter,
}

impl ArrayEditor {
    pub fn new(writer: AtomicWriter) -> Self {
        Self { writer }
    }

    /// Add `entries` to array `name` in `path`. With `write == false` the
    /// result is computed identically but nothing is written or backed up.
    pub fn add_entries<S: AsRef<str>>(
        &self,
        path: &Path,
        name: &str,
        entries: &[S],
        write: bool,
    ) -> Result<ArrayEditResult> {
        let content = read_file(path)?;
        let edit = add_entries_to_text(&content, name, entries)
            .map_err(|e| e.at_path(path))?;

        self.finish(path, name, edit, write, "add")
    }

    /// Remove `entries` from array `name` in `path`.
    pub fn remove_entries<S: AsRef<str>>(
        &self,
        path: &Path,
        name: &str,
        entries: &[S],
        write: bool,
    ) -> Result<ArrayEditResult> {
        let content = read_file(path)?;
        let edit = remove_entries_from_text(&content, name, entries)
            .map_err(|e| e.at_path(path))?;

        self.finish(path, name, edit, write, "remove")
    }

    fn finish(
        &self,
        path: &Path,
        name: &str,
        edit: ArrayEdit,
        write: bool,
        verb: &str,
    ) -> Result<ArrayEditResult> {
        let ArrayEdit {
            new_content,
            before_count,
            after_count,
            mut events,
        } = edit;
        let delta = before_count.abs_diff(after_count);

        let changed = match new_content {
            None => {
                debug!(path = %path.display(), array = name, "no entries to {verb}");
                false
            }
            Some(content) if write => {
                events.extend(self.writer.write(path, &content)?);
                info!("{verb}: {delta} entries in {}:{name}", path.display());
                true
            }
            Some(_) => {
                events.push(EditEvent::DryRun);
                info!(
                    "Dry-run: would {verb} {delta} entries in {}:{name}",
                    path.display()
                );
                true
            }
        };

        Ok(ArrayEditResult {
            path: path.to_path_buf(),
            array: name.to_string(),
            changed,
            before_count,
            after_count,
            events,
        })
    }
}
