//! Injecting `--exclude=` flags into install command lines.
//!
//! Purely line based: array declarations are never parsed here, so this
//! pass can run before or after array edits on the same file. Each pass
//! reads the file fresh.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{EditError, Result};
use crate::model::{EditEvent, InstallPattern, RewriteResult};
use crate::parser::command::{exclusion_flags, InstallMatcher};
use crate::utils::path::read_file;
use crate::utils::strings::{join_lines, split_lines};
use crate::utils::AtomicWriter;

/// Computed rewrite of one file's install lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEdit {
    /// Full new content, `None` when no line changed
    pub new_content: Option<String>,
    pub modified_count: usize,
    pub events: Vec<EditEvent>,
}

/// Rewrite every install line of `content` to exclude `packages`.
pub fn add_exclusions_to_text<S: AsRef<str>>(
    content: &str,
    matcher: &InstallMatcher,
    packages: &[S],
) -> CommandEdit {
    if packages.is_empty() {
        return CommandEdit {
            new_content: None,
            modified_count: 0,
            events: vec![EditEvent::NothingToDo],
        };
    }

    let flags = exclusion_flags(packages);
    let mut events = Vec::new();

    let lines: Vec<String> = split_lines(content)
        .into_iter()
        .enumerate()
        .map(|(idx, line)| match matcher.rewrite_line(line, &flags) {
            Some(rewritten) => {
                events.push(EditEvent::LineRewritten {
                    line: idx,
                    before: line.to_string(),
                    after: rewritten.clone(),
                });
                rewritten
            }
            None => line.to_string(),
        })
        .collect();

    let modified_count = events.len();
    if modified_count == 0 {
        events.push(EditEvent::NothingToDo);
        return CommandEdit {
            new_content: None,
            modified_count,
            events,
        };
    }

    CommandEdit {
        new_content: Some(join_lines(&lines)),
        modified_count,
        events,
    }
}

/// File-level install command rewriter.
#[derive(Debug, Clone)]
pub struct CommandRewriter {
    matcher: InstallMatcher,
    writer: AtomicWriter,
}

impl CommandRewriter {
    pub fn new(pattern: &InstallPattern, writer: AtomicWriter) -> Result<Self> {
        let matcher = match InstallMatcher::new(pattern) {
            Ok(matcher) => matcher,
            Err(source) => {
                return Err(EditError::InstallPattern {
                    command: pattern.command.clone(),
                    source,
                })
            }
        };
        Ok(Self { matcher, writer })
    }

    pub fn matcher(&self) -> &InstallMatcher {
        &self.matcher
    }

    /// Every `(line_index, line)` in `path` holding an install command.
    pub fn find_install_commands(&self, path: &Path) -> Result<Vec<(usize, String)>> {
        let content = read_file(path)?;
        let matches = self.matcher.find_matches(&split_lines(&content));
        debug!(
            "Found {} {} install commands with {} in {}",
            matches.len(),
            self.matcher.pattern().command,
            self.matcher.pattern().list_name,
            path.display()
        );
        Ok(matches)
    }

    /// Add `--exclude=<pkg>` for every package to each install line.
    ///
    /// With `write == false` nothing is written or backed up, but the result
    /// is the same as for a real run.
    pub fn add_exclusions<S: AsRef<str>>(
        &self,
        path: &Path,
        packages: &[S],
        write: bool,
    ) -> Result<RewriteResult> {
        let command = &self.matcher.pattern().command;

        if packages.is_empty() {
            warn!("No packages to exclude provided");
            return Ok(RewriteResult {
                path: path.to_path_buf(),
                modified_count: 0,
                message: "No packages to exclude".to_string(),
                events: vec![EditEvent::NothingToDo],
            });
        }

        let content = read_file(path)?;
        let CommandEdit {
            new_content,
            modified_count,
            mut events,
        } = add_exclusions_to_text(&content, &self.matcher, packages);

        for event in &events {
            if let EditEvent::LineRewritten { .. } = event {
                debug!("{}: {}", path.display(), event);
            }
        }

        let message = match new_content {
            None => format!("No {command} install commands found to modify"),
            Some(content) if write => {
                events.extend(self.writer.write(path, &content)?);
                info!(
                    "Modified {modified_count} {command} install commands in {}",
                    path.display()
                );
                format!("Successfully modified {modified_count} {command} install command(s)")
            }
            Some(_) => {
                events.push(EditEvent::DryRun);
                info!(
                    "Dry-run: would modify {modified_count} {command} install commands in {}",
                    path.display()
                );
                format!("Dry-run: would modify {modified_count} {command} install command(s)")
            }
        };

        Ok(RewriteResult {
            path: path.to_path_buf(),
            modified_count,
            message,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> InstallMatcher {
        InstallMatcher::new(&InstallPattern::default()).unwrap()
    }

    #[test]
    fn test_rewrites_each_matching_line() {
        let src = "#!/bin/bash
dnf -y install ${FEDORA_PACKAGES[@]}
  dnf install \"${FEDORA_PACKAGES[@]}\"
dnf -y install vim
";
        let edit = add_exclusions_to_text(src, &matcher(), &["a", "b"]);
        assert_eq!(edit.modified_count, 2);
        assert_eq!(
            edit.new_content.as_deref(),
            Some(
                "#!/bin/bash
dnf -y install --exclude=a --exclude=b ${FEDORA_PACKAGES[@]}
  dnf install --exclude=a --exclude=b \"${FEDORA_PACKAGES[@]}\"
dnf -y install vim
"
            )
        );
    }

    #[test]
    fn test_no_match_is_noop() {
        let edit = add_exclusions_to_text("echo hi\n", &matcher(), &["a"]);
        assert_eq!(edit.modified_count, 0);
        assert!(edit.new_content.is_none());
    }

    #[test]
    fn test_empty_packages_is_noop() {
        let src = "dnf -y install ${FEDORA_PACKAGES[@]}\n";
        let edit = add_exclusions_to_text(src, &matcher(), &[] as &[&str]);
        assert_eq!(edit.modified_count, 0);
        assert_eq!(edit.events, vec![EditEvent::NothingToDo]);
    }

    #[test]
    fn test_array_declaration_untouched() {
        let src = "FEDORA_PACKAGES=(\n    dnf-plugins-core\n)\n\
                   dnf -y install ${FEDORA_PACKAGES[@]}\n";
        let edit = add_exclusions_to_text(src, &matcher(), &["x"]);
        assert_eq!(edit.modified_count, 1);
        assert!(edit
            .new_content
            .unwrap()
            .starts_with("FEDORA_PACKAGES=(\n    dnf-plugins-core\n)\n"));
    }

    #[test]
    fn test_rewrite_events_record_lines() {
        let src = "x\ndnf install ${FEDORA_PACKAGES[@]}\n";
        let edit = add_exclusions_to_text(src, &matcher(), &["p"]);
        assert_eq!(
            edit.events,
            vec![EditEvent::LineRewritten {
                line: 1,
                before: "dnf install ${FEDORA_PACKAGES[@]}".into(),
                after: "dnf install --exclude=p ${FEDORA_PACKAGES[@]}".into(),
            }]
        );
    }
}
