//! Character filtering for pasted text.

/// Chars of `text` that may be inserted into an input. Control characters
/// (tabs, escapes, carriage returns) are dropped. Line feeds survive only
/// when `multiline` is set.
pub fn sanitize(text: &str, multiline: bool) -> Vec<char> {
    text.chars()
        .filter(|c| !c.is_control() || (multiline && *c == '\n'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_removes_control_chars() {
        assert_eq!(sanitize("a\tb\x1b[0mc\r\n", false), vec!['a', 'b', '[', '0', 'm', 'c']);
    }

    #[test]
    fn sanitize_keeps_line_feeds_when_multiline() {
        assert_eq!(sanitize("a\r\nb\t", true), vec!['a', '\n', 'b']);
    }

    #[test]
    fn sanitize_keeps_printable() {
        assert_eq!(sanitize("héllo wörld", false).len(), 11);
    }
}
