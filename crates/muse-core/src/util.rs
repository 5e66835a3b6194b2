//! Text helpers for user input, config values and remote payloads.

const EXCERPT_MAX_CHARS: usize = 180;

/// Trimmed copy of `value`, or `None` when only whitespace is left.
pub fn trimmed_non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// [`trimmed_non_empty`] for optional config and payload fields.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(trimmed_non_empty)
}

/// Whether `value` uses the `http` or `https` scheme (any case).
pub fn is_http_url(value: &str) -> bool {
    value
        .split_once("://")
        .is_some_and(|(scheme, _)| {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        })
}

/// Single-line excerpt of a response body for error messages.
pub fn compact_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(EXCERPT_MAX_CHARS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_normalize_to_none() {
        assert_eq!(trimmed_non_empty(" \n\t "), None);
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
        assert_eq!(
            normalize_text_option(Some(" Server ".to_string())),
            Some("Server".to_string())
        );
    }

    #[test]
    fn http_scheme_check_ignores_case() {
        assert!(is_http_url("HTTPS://quotes.example.com"));
        assert!(is_http_url("http://localhost:8080"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("quotes.example.com/http://"));
        assert!(!is_http_url("example.com"));
    }

    #[test]
    fn excerpt_is_single_line_and_bounded() {
        assert_eq!(compact_text("  <html>\n  <body>oops</body>\n"), "<html> <body>oops</body>");
        assert_eq!(compact_text(&"x".repeat(500)).len(), EXCERPT_MAX_CHARS);
    }
}
