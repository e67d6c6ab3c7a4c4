//! # Shell Script Regex Patterns
//!
//! Static regex patterns for recognizing bash array declarations.
//!
//! ## Pattern Naming Convention
//!
//! - `*_START_RE` - Opening line of a (possibly multi-line) construct
//! - `*_END_RE` - Line closing a multi-line construct
//!
//! Install-command patterns depend on the configured command and list name,
//! so they are compiled per [`InstallMatcher`](super::command::InstallMatcher)
//! instead of living here.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // =========================================================================
    // Array Declaration Patterns
    // =========================================================================

    /// Matches the opening of an array declaration: `NAME=(`
    ///
    /// Captures:
    /// - Group 1: array name
    pub static ref ARRAY_START_RE: Regex = Regex::new(
        r#"^\s*([A-Za-z0-9_]+)\s*=\s*\("#
    ).unwrap();

    /// Matches a parenthesized body on a single line: `NAME=(a b "c d")`
    ///
    /// Captures:
    /// - Group 1: text between the first `(` and the last `)`
    pub static ref INLINE_BODY_RE: Regex = Regex::new(
        r#"\((.*)\)"#
    ).unwrap();

    /// Matches the closing line of a multi-line array: whitespace then `)`
    pub static ref ARRAY_END_RE: Regex = Regex::new(
        r#"^\s*\)"#
    ).unwrap();

    // =========================================================================
    // Entry Patterns
    // =========================================================================

    /// Matches one token of an inline array body.
    ///
    /// Alternatives are tried leftmost-first: double-quoted span,
    /// single-quoted span, then a run of non-whitespace.
    pub static ref TOKEN_RE: Regex = Regex::new(
        r#""[^"]*"|'[^']*'|\S+"#
    ).unwrap();

    /// Matches a trailing inline comment: whitespace, `#`, rest of line
    pub static ref TRAILING_COMMENT_RE: Regex = Regex::new(
        r#"\s+#.*$"#
    ).unwrap();
}
