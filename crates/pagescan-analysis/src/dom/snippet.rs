//! HTML snippet extraction for display and deduplication.
//!
//! Both functions are pure and total: empty or malformed input yields an
//! empty or best-effort result. Truncation is idempotent — re-applying
//! with the same limit returns the input unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Collapse whitespace runs to single spaces and trim the ends.
pub fn normalize_whitespace(html: &str) -> String {
    WHITESPACE_RUN.replace_all(html.trim(), " ").into_owned()
}

/// Truncate `html` to at most `max_length` characters.
///
/// Whitespace is normalized first. When the normalized input is too long,
/// the cut prefers the boundary just after the opening tag if that still
/// fits; otherwise the text is hard-truncated with a trailing ellipsis.
pub fn extract_snippet(html: &str, max_length: usize) -> String {
    let normalized = normalize_whitespace(html);
    let total_chars = normalized.chars().count();
    if total_chars <= max_length {
        return normalized;
    }
    if max_length == 0 {
        return String::new();
    }

    // Boundary just after the opening tag, when it fits the limit.
    if let Some(tag_end) = normalized.find('>') {
        let chars_through_tag = normalized[..=tag_end].chars().count();
        if chars_through_tag <= max_length {
            return normalized[..=tag_end].to_string();
        }
    }

    let mut out: String = normalized.chars().take(max_length.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_unchanged() {
        assert_eq!(extract_snippet("<div>", 100), "<div>");
    }

    #[test]
    fn test_whitespace_normalized() {
        assert_eq!(
            extract_snippet("<div   class=\"a\">\n\t  text  </div>", 100),
            "<div class=\"a\"> text </div>"
        );
    }

    #[test]
    fn test_prefers_opening_tag_boundary() {
        let html = "<button class=\"primary\">Save all pending changes</button>";
        let snippet = extract_snippet(html, 30);
        assert_eq!(snippet, "<button class=\"primary\">");
    }

    #[test]
    fn test_hard_truncation_with_ellipsis() {
        let html = "<button class=\"a-very-long-class-name-that-never-ends\">x</button>";
        let snippet = extract_snippet(html, 16);
        assert_eq!(snippet.chars().count(), 16);
        assert!(snippet.ends_with('…'));
    }

    #[test]
    fn test_truncation_idempotent() {
        let html = "<section class=\"content\">Some reasonably long inner text here</section>";
        for limit in [5, 10, 16, 26, 40, 200] {
            let once = extract_snippet(html, limit);
            let twice = extract_snippet(&once, limit);
            assert_eq!(once, twice, "limit {limit}");
            assert!(once.chars().count() <= limit.max(1));
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(extract_snippet("", 10), "");
        assert_eq!(extract_snippet("   ", 10), "");
    }
}
