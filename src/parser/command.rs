//! # Install Command Matching
//!
//! Line-local recognition of package-install invocations such as
//! `dnf -y install ${FEDORA_PACKAGES[@]}`.
//!
//! Two patterns are compiled from an [`InstallPattern`]:
//!
//! | Pattern | Anchoring | Used by |
//! |---------|-----------|---------|
//! | search  | anywhere in the line | discovery (`find_matches`) |
//! | line    | `^(\s*)(...)$`, command first | rewriting (`classify`) |
//!
//! Shell line continuations are not followed; a command split over several
//! lines only matches if the list name is on the `install` line.

use regex::Regex;

use crate::model::InstallPattern;

/// The literal keyword after which exclusion flags are inserted.
pub const INSTALL_KEYWORD: &str = "install";

/// Classification of a line against the anchored install pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallLine<'a> {
    Matched {
        /// Leading whitespace
        indent: &'a str,
        /// Everything from the command token to end of line
        command: &'a str,
    },
    NoMatch,
}

/// Compiled matcher for one install pattern.
#[derive(Debug, Clone)]
pub struct InstallMatcher {
    pattern: InstallPattern,
    search_re: Regex,
    line_re: Regex,
}

impl InstallMatcher {
    pub fn new(pattern: &InstallPattern) -> Result<Self, regex::Error> {
        let core = Self::core_pattern(pattern);
        Ok(Self {
            pattern: pattern.clone(),
            search_re: Regex::new(&core)?,
            line_re: Regex::new(&format!(r"^(\s*)({core}.*)$"))?,
        })
    }

    fn core_pattern(pattern: &InstallPattern) -> String {
        let flag = match pattern.flag.as_deref() {
            Some(flag) if !flag.is_empty() => format!(r"(?:{}\s+)?", regex::escape(flag)),
            _ => String::new(),
        };
        format!(
            r"{}\s+{}{}.*{}",
            regex::escape(&pattern.command),
            flag,
            INSTALL_KEYWORD,
            regex::escape(&pattern.list_name)
        )
    }

    pub fn pattern(&self) -> &InstallPattern {
        &self.pattern
    }

    /// Unanchored search, as used to decide whether a file is relevant.
    pub fn is_match(&self, line: &str) -> bool {
        self.search_re.is_match(line)
    }

    pub fn classify<'a>(&self, line: &'a str) -> InstallLine<'a> {
        match self.line_re.captures(line) {
            Some(caps) => match (caps.get(1), caps.get(2)) {
                (Some(indent), Some(command)) => InstallLine::Matched {
                    indent: indent.as_str(),
                    command: command.as_str(),
                },
                _ => InstallLine::NoMatch,
            },
            None => InstallLine::NoMatch,
        }
    }

    /// Every `(line_index, line)` containing an install command.
    pub fn find_matches<S: AsRef<str>>(&self, lines: &[S]) -> Vec<(usize, String)> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.is_match(line.as_ref()))
            .map(|(idx, line)| (idx, line.as_ref().to_string()))
            .collect()
    }

    /// Rewrite a single line, or `None` if it is not an install line.
    ///
    /// Flags go right after the first `install` of the command; later
    /// occurrences (for example inside package names) are untouched.
    pub fn rewrite_line(&self, line: &str, flags: &str) -> Option<String> {
        match self.classify(line) {
            InstallLine::Matched { indent, command } => {
                let injected = command.replacen(
                    INSTALL_KEYWORD,
                    &format!("{INSTALL_KEYWORD} {flags}"),
                    1,
                );
                Some(format!("{indent}{injected}"))
            }
            InstallLine::NoMatch => None,
        }
    }
}

/// `--exclude=<pkg>` for each package, space-joined, order kept.
pub fn exclusion_flags<S: AsRef<str>>(packages: &[S]) -> String {
    packages
        .iter()
        .map(|pkg| format!("--exclude={}", pkg.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dnf() -> InstallMatcher {
        InstallMatcher::new(&InstallPattern::default()).unwrap()
    }

    #[test]
    fn test_search_matches_variants() {
        let m = dnf();
        assert!(m.is_match("dnf -y install ${FEDORA_PACKAGES[@]}"));
        assert!(m.is_match("dnf install \"${FEDORA_PACKAGES[@]}\""));
        assert!(m.is_match("sudo dnf -y install ${FEDORA_PACKAGES[@]}"));
        assert!(!m.is_match("dnf -y install vim"));
        assert!(!m.is_match("dnf -y remove ${FEDORA_PACKAGES[@]}"));
        assert!(!m.is_match("DNF -y install ${FEDORA_PACKAGES[@]}"));
    }

    #[test]
    fn test_classify_anchored() {
        let m = dnf();
        assert_eq!(
            m.classify("    dnf -y install ${FEDORA_PACKAGES[@]}"),
            InstallLine::Matched {
                indent: "    ",
                command: "dnf -y install ${FEDORA_PACKAGES[@]}",
            }
        );
        // Found by search, but the command is not the first token
        assert_eq!(
            m.classify("sudo dnf -y install ${FEDORA_PACKAGES[@]}"),
            InstallLine::NoMatch
        );
    }

    #[test]
    fn test_rewrite_line() {
        let m = dnf();
        let flags = exclusion_flags(&["a", "b"]);
        assert_eq!(
            m.rewrite_line("dnf -y install ${FEDORA_PACKAGES[@]}", &flags)
                .as_deref(),
            Some("dnf -y install --exclude=a --exclude=b ${FEDORA_PACKAGES[@]}")
        );
        assert_eq!(m.rewrite_line("dnf -y install vim", &flags), None);
    }

    #[test]
    fn test_rewrite_only_first_install() {
        let m = dnf();
        let line = "dnf install ${FEDORA_PACKAGES[@]} installer-tools";
        assert_eq!(
            m.rewrite_line(line, "--exclude=x").as_deref(),
            Some("dnf install --exclude=x ${FEDORA_PACKAGES[@]} installer-tools")
        );
    }

    #[test]
    fn test_custom_pattern_without_flag() {
        let pattern = InstallPattern {
            command: "apt-get".into(),
            flag: None,
            list_name: "DEB_PACKAGES".into(),
        };
        let m = InstallMatcher::new(&pattern).unwrap();
        assert!(m.is_match("apt-get install ${DEB_PACKAGES[@]}"));
        assert!(!m.is_match("apt-get -y install ${DEB_PACKAGES[@]}"));
    }

    #[test]
    fn test_find_matches() {
        let lines = vec![
            "#!/bin/bash",
            "dnf -y install ${FEDORA_PACKAGES[@]}",
            "echo ok",
            "  dnf install ${FEDORA_PACKAGES[@]} && true",
        ];
        let found = dnf().find_matches(&lines);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0, 1);
        assert_eq!(found[1].0, 3);
    }

    #[test]
    fn test_exclusion_flags_keep_duplicates() {
        assert_eq!(
            exclusion_flags(&["a", "a"]),
            "--exclude=a --exclude=a"
        );
    }
}
