//! String utility functions

/// Split file content into lines, preserving trailing empty lines (unlike `.lines()`).
///
/// A single trailing newline is treated as the terminator of the last line,
/// and a `\r` before each `\n` is dropped so CRLF scripts split the same way:
/// - `"a\nb"` → `["a", "b"]`
/// - `"a\n"` → `["a"]`
/// - `"a\n\n"` → `["a", ""]`
/// - `"a\r\nb\r\n"` → `["a", "b"]`
///
/// # Examples
///
/// ```
/// use buildtweak::utils::strings::split_lines;
///
/// assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
/// assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
/// assert_eq!(split_lines(""), Vec::<&str>::new());
/// ```
pub fn split_lines(s: &str) -> Vec<&str> {
    if s.is_empty() {
        return Vec::new();
    }

    let mut result: Vec<&str> = s
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    // split('\n') yields an empty string after the final '\n'; that is the
    // terminator, not a line.
    if s.ends_with('\n') && result.last() == Some(&"") {
        result.pop();
    }

    result
}

/// Join lines with `\n` and guarantee exactly one trailing newline.
pub fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    if out.is_empty() {
        out.push('\n');
    }
    out
}

/// Leading whitespace of a line.
pub fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string() {
        assert_eq!(split_lines(""), Vec::<&str>::new());
    }

    #[test]
    fn test_no_newline() {
        assert_eq!(split_lines("hello"), vec!["hello"]);
    }

    #[test]
    fn test_single_trailing_newline() {
        assert_eq!(split_lines("hello\n"), vec!["hello"]);
    }

    #[test]
    fn test_trailing_blank_lines_kept() {
        assert_eq!(split_lines("a\n\n\n"), vec!["a", "", ""]);
    }

    #[test]
    fn test_crlf() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_join_adds_single_newline() {
        assert_eq!(join_lines(["a", "b"]), "a\nb\n");
        assert_eq!(join_lines(Vec::<String>::new()), "\n");
    }

    #[test]
    fn test_leading_whitespace() {
        assert_eq!(leading_whitespace("    firefox"), "    ");
        assert_eq!(leading_whitespace("\tvim"), "\t");
        assert_eq!(leading_whitespace("none"), "");
    }
}
