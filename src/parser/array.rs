//! # Array Block Parsing
//!
//! Locates a named `NAME=( ... )` declaration in a line sequence and reads
//! its entries.
//!
//! ## State Machine
//!
//! ```text
//! find_array_start ──None──────────────▶ not found
//!        │
//!        ▼
//! classify_start_line ──Inline──▶ tokens of the same line (end == start)
//!        │
//!      Block
//!        ▼
//! scan_block ──Terminated──▶ raw entry lines + indentation
//!        │
//!        └───Unterminated──▶ parse error
//! ```
//!
//! Entries are kept raw; comparison always goes through [`normalize_entry`].

use super::patterns::*;
use crate::utils::strings::leading_whitespace;

/// Shape of an array declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayForm {
    /// `NAME=(a b c)` on one line. `open..close` is the byte span of
    /// `( ... )` within the declaration line, parentheses included.
    Inline { open: usize, close: usize },
    /// One entry per line, closed by a `)`-only line.
    Block,
}

/// A parsed array declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayBlock {
    pub name: String,
    /// Index of the `NAME=(` line
    pub start: usize,
    /// Index of the closing `)` line (equal to `start` for inline arrays)
    pub end: usize,
    pub form: ArrayForm,
    /// Raw entry lines (block) or raw tokens (inline)
    pub entries: Vec<String>,
    /// Leading whitespace of the first non-empty entry line
    pub indent: String,
}

impl ArrayBlock {
    /// Normalized, non-empty entries in declaration order.
    pub fn normalized_entries(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter_map(|raw| normalize_entry(raw))
            .collect()
    }

    pub fn is_inline(&self) -> bool {
        matches!(self.form, ArrayForm::Inline { .. })
    }
}

/// Classification of a candidate declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartLine {
    /// Opening and closing parenthesis on the same line
    Inline {
        open: usize,
        close: usize,
        inner: String,
    },
    /// Entries follow on subsequent lines
    Block,
}

/// Classification of a line inside a multi-line array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLine {
    Terminator,
    Entry,
}

/// Outcome of scanning the lines after a block-form opening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockScan {
    Terminated {
        end: usize,
        entries: Vec<String>,
        indent: String,
    },
    /// EOF reached without a closing line
    Unterminated,
}

/// Whether `line` opens the declaration of `name` (`^\s*NAME\s*=\s*\(`).
///
/// The name is compared literally, so it may contain any character.
pub fn is_array_start(line: &str, name: &str) -> bool {
    line.trim_start()
        .strip_prefix(name)
        .and_then(|rest| rest.trim_start().strip_prefix('='))
        .is_some_and(|rest| rest.trim_start().starts_with('('))
}

/// Index of the first line declaring `name`.
pub fn find_array_start<S: AsRef<str>>(lines: &[S], name: &str) -> Option<usize> {
    lines
        .iter()
        .position(|line| is_array_start(line.as_ref(), name))
}

/// Whether any line of `content` declares `name`.
pub fn declares_array(content: &str, name: &str) -> bool {
    content.lines().any(|line| is_array_start(line, name))
}

/// Whether any line of `content` declares an array at all.
pub fn declares_any_array(content: &str) -> bool {
    content.lines().any(|line| ARRAY_START_RE.is_match(line))
}

/// Decide between inline and block form for a declaration line.
pub fn classify_start_line(line: &str) -> StartLine {
    match INLINE_BODY_RE.captures(line) {
        Some(caps) => {
            // Group 0 always exists on a successful capture
            let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
            StartLine::Inline {
                open: whole.start,
                close: whole.end,
                inner: caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string(),
            }
        }
        None => StartLine::Block,
    }
}

pub fn classify_block_line(line: &str) -> BlockLine {
    if ARRAY_END_RE.is_match(line) {
        BlockLine::Terminator
    } else {
        BlockLine::Entry
    }
}

/// Split an inline array body into raw tokens.
///
/// Quoted spans stay intact together with their quotes.
pub fn tokenize_inline(inner: &str) -> Vec<String> {
    TOKEN_RE
        .find_iter(inner.trim())
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collect entry lines from `start + 1` up to the first `)`-only line.
pub fn scan_block<S: AsRef<str>>(lines: &[S], start: usize) -> BlockScan {
    let mut entries = Vec::new();
    let mut indent: Option<String> = None;

    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        let line = line.as_ref();
        if classify_block_line(line) == BlockLine::Terminator {
            return BlockScan::Terminated {
                end: idx,
                entries,
                indent: indent.unwrap_or_default(),
            };
        }
        if indent.is_none() && !line.trim().is_empty() {
            indent = Some(leading_whitespace(line).to_string());
        }
        entries.push(line.to_string());
    }

    BlockScan::Unterminated
}

/// Parse the array declared at `start`.
///
/// Returns `None` when the block is never closed; callers turn that into
/// an unterminated-array error with file context.
pub fn parse_array_block<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    name: &str,
) -> Option<ArrayBlock> {
    let first = lines.get(start)?.as_ref();

    match classify_start_line(first) {
        StartLine::Inline { open, close, inner } => Some(ArrayBlock {
            name: name.to_string(),
            start,
            end: start,
            form: ArrayForm::Inline { open, close },
            entries: tokenize_inline(&inner),
            indent: String::new(),
        }),
        StartLine::Block => match scan_block(lines, start) {
            BlockScan::Terminated {
                end,
                entries,
                indent,
            } => Some(ArrayBlock {
                name: name.to_string(),
                start,
                end,
                form: ArrayForm::Block,
                entries,
                indent,
            }),
            BlockScan::Unterminated => None,
        },
    }
}

/// Reduce a raw entry to the token used for comparison.
///
/// Returns `None` for blank lines, full-line comments, and entries that are
/// empty once decorations are removed.
pub fn normalize_entry(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() || s.starts_with('#') {
        return None;
    }

    let s = TRAILING_COMMENT_RE.replace(s, "");
    // Continuation markers: any trailing run of spaces and backslashes
    let s = s.trim_end_matches([' ', '\\']);
    let s = strip_matching_quotes(s);

    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Remove one layer of surrounding `"..."` or `'...'`.
///
/// A lone quote character counts as an empty quoted pair.
fn strip_matching_quotes(s: &str) -> &str {
    let quoted = (s.starts_with('"') && s.ends_with('"'))
        || (s.starts_with('\'') && s.ends_with('\''));
    if !quoted {
        return s;
    }
    s.get(1..s.len() - 1).unwrap_or("")
}
