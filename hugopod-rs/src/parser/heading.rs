//! Removing the title heading injected by body renderers.

use regex::Regex;
use std::sync::LazyLock;

// A level-one ATX heading line, including its line break.
static TITLE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^# .*(?:\r?\n)?").unwrap()
});

/// Remove the first `# ` heading line. Later headings are kept.
pub fn strip_title_heading(body: &str) -> String {
    TITLE_HEADING.replace(body, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_first_title_only() {
        let body = "# Title\n\nText\n\n# Second\n";
        assert_eq!(strip_title_heading(body), "\nText\n\n# Second\n");
    }

    #[test]
    fn test_subheadings_untouched() {
        let body = "## Section\n\nText\n";
        assert_eq!(strip_title_heading(body), body);
    }

    #[test]
    fn test_title_not_on_first_line() {
        let body = "intro\n# Title\nrest";
        assert_eq!(strip_title_heading(body), "intro\nrest");
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        let body = "#tag and text";
        assert_eq!(strip_title_heading(body), body);
    }

    #[test]
    fn test_title_at_eof() {
        assert_eq!(strip_title_heading("text\n# Title"), "text\n");
    }
}
