use std::sync::OnceLock;

use regex::Regex;

/// Rewrites `\r\n` and lone `\r` line breaks to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    static LINE_BREAK: OnceLock<Regex> = OnceLock::new();
    let line_break = LINE_BREAK.get_or_init(|| Regex::new(r"\r\n?").unwrap());
    line_break.replace_all(text, "\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_and_cr() {
        assert_eq!(normalize_line_endings("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn lf_untouched() {
        assert_eq!(normalize_line_endings("Hello!\nBye~\n"), "Hello!\nBye~\n");
    }

    #[test]
    fn blank_lines_kept() {
        assert_eq!(normalize_line_endings("a\r\n\r\nb"), "a\n\nb");
    }
}
