//! Escaping primitives for generated markup.
//!
//! - [`esc_html`] escapes free text for element content or attribute values.
//! - [`esc_url`] cleans a URL and makes it safe inside a quoted attribute.
//! - [`strip_tags`] reduces markup to its decoded text.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

pub use crate::dom::strip_tags;

/// Characters that require HTML escaping.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

/// Bytes percent-encoded in URLs: controls, non-ASCII, and characters that
/// would break out of a quoted attribute or confuse a parser.
const URL_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'^');

/// Schemes allowed in emitted URLs. Scheme-less (relative) URLs are always allowed.
const ALLOWED_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "ftps", "mailto", "news", "irc", "gopher", "nntp", "feed", "telnet",
    "mms", "rtsp", "sms", "svn", "tel", "fax", "xmpp", "webcal", "urn",
];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#039;"),
        _ => None,
    }
}

/// Escape HTML special characters in text.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
///
/// ```
/// use instant_markup::escape::esc_html;
///
/// assert_eq!(esc_html("<script>"), "&lt;script&gt;");
/// assert_eq!(esc_html("hello"), "hello");
/// ```
pub fn esc_html(s: &str) -> Cow<'_, str> {
    if !s.contains(&ESCAPE_CHARS[..]) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Extract the scheme of a URL, if it has one.
///
/// A scheme is the run of letters, digits, `+`, `-` and `.` before the first
/// `:`, provided no `/`, `?` or `#` comes first.
fn scheme(url: &str) -> Option<&str> {
    let colon = url.find(':')?;
    let candidate = &url[..colon];
    if candidate.is_empty() || candidate.contains(&['/', '?', '#'][..]) {
        return None;
    }
    candidate
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        .then_some(candidate)
}

/// Check that a URL is relative or uses an allowed scheme.
pub fn has_allowed_scheme(url: &str) -> bool {
    let cleaned: String = url.trim().chars().filter(|c| !c.is_control()).collect();
    match scheme(&cleaned) {
        Some(scheme) => ALLOWED_SCHEMES
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(scheme)),
        None => true,
    }
}

/// Clean a URL for use in an HTML attribute.
///
/// Returns an empty string for URLs whose scheme is not allowed (e.g.
/// `javascript:`). Whitespace is trimmed, spaces, control and non-ASCII
/// characters are percent-encoded, and `&` and `'` are entity-escaped.
///
/// ```
/// use instant_markup::escape::esc_url;
///
/// assert_eq!(esc_url("https://example.com/a b.jpg?x=1&y=2"),
///            "https://example.com/a%20b.jpg?x=1&amp;y=2");
/// assert_eq!(esc_url("javascript:alert(1)"), "");
/// ```
pub fn esc_url(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }

    if !has_allowed_scheme(url) {
        log::debug!("rejected URL with disallowed scheme: {url:?}");
        return String::new();
    }

    // Control characters are dropped so they cannot hide a scheme.
    let cleaned: String = url.chars().filter(|c| !c.is_control()).collect();

    let encoded = utf8_percent_encode(&cleaned, URL_ENCODE_SET).to_string();
    let mut result = String::with_capacity(encoded.len());
    for c in encoded.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '\'' => result.push_str("&#039;"),
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esc_html_all_specials() {
        assert_eq!(esc_html(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;");
    }

    #[test]
    fn test_esc_html_borrows_when_clean() {
        assert!(matches!(esc_html("plain text"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_esc_url_relative_urls_pass() {
        assert_eq!(esc_url("/wp-content/uploads/a.jpg"), "/wp-content/uploads/a.jpg");
        assert_eq!(esc_url("a.jpg"), "a.jpg");
        assert_eq!(esc_url("  //cdn.example.com/x.png "), "//cdn.example.com/x.png");
    }

    #[test]
    fn test_esc_url_rejects_bad_schemes() {
        assert_eq!(esc_url("javascript:alert(1)"), "");
        assert_eq!(esc_url("JaVaScRiPt:alert(1)"), "");
        assert_eq!(esc_url("java\tscript:alert(1)"), "");
        assert_eq!(esc_url("data:text/html;base64,xx"), "");
    }

    #[test]
    fn test_esc_url_allows_known_schemes() {
        assert_eq!(esc_url("HTTPS://example.com"), "HTTPS://example.com");
        assert_eq!(esc_url("mailto:a@example.com"), "mailto:a@example.com");
    }

    #[test]
    fn test_esc_url_encodes_breakout_characters() {
        assert_eq!(
            esc_url(r#"https://example.com/"><script>"#),
            "https://example.com/%22%3E%3Cscript%3E"
        );
        assert_eq!(esc_url("https://example.com/café.jpg"), "https://example.com/caf%C3%A9.jpg");
        assert_eq!(esc_url("/it's.png"), "/it&#039;s.png");
    }

    #[test]
    fn test_esc_url_colon_after_path_is_not_scheme() {
        assert_eq!(esc_url("/path/a:b.jpg"), "/path/a:b.jpg");
        assert_eq!(esc_url("?q=a:b"), "?q=a:b");
    }
}
