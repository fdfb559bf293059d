//! Shortcode scanning and attribute parsing.
//!
//! Recognized forms, for a registered tag `t`:
//!
//! - `[t attrs]` and `[t attrs /]`
//! - `[t attrs]inner[/t]`: the inner text runs to the first `[/t]`
//! - `[[t attrs]]`: escaped, rendered literally as `[t attrs]`

use memchr::memchr;

/// Parsed shortcode attributes, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs {
    named: Vec<(String, String)>,
}

impl Attrs {
    /// Get a named attribute (names are lowercase).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Named attributes in source order.
    pub fn named(&self) -> &[(String, String)] {
        &self.named
    }
}

/// One shortcode invocation found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shortcode<'a> {
    pub tag: &'a str,
    pub attrs: Attrs,
    /// Text between the opening and closing tag, when closed.
    pub content: Option<&'a str>,
}

fn is_attr_key_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

/// Parse the attribute text of a shortcode.
///
/// Accepts `key="v"`, `key='v'` and `key=v`. Bare `"v"`, `'v'` or `v`
/// values are skipped. Keys are lowercased; non-breaking and zero-width
/// spaces count as whitespace.
pub fn parse_attrs(text: &str) -> Attrs {
    let text: String = text
        .chars()
        .map(|c| if c == '\u{a0}' || c == '\u{200b}' { ' ' } else { c })
        .collect();
    let mut attrs = Attrs::default();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        let key_len = rest
            .char_indices()
            .find(|&(_, c)| !is_attr_key_char(c))
            .map_or(rest.len(), |(i, _)| i);

        if key_len > 0 {
            let after_key = rest[key_len..].trim_start();
            if let Some(after_eq) = after_key.strip_prefix('=') {
                let key = rest[..key_len].to_lowercase();
                let after_eq = after_eq.trim_start();
                let (value, remaining) = take_value(after_eq);
                attrs.named.push((key, value.to_string()));
                rest = remaining.trim_start();
                continue;
            }
        }

        let (_, remaining) = take_value(rest);
        rest = remaining.trim_start();
    }

    attrs
}

/// Take a quoted or whitespace-delimited value from the front of `s`.
fn take_value(s: &str) -> (&str, &str) {
    for quote in ['"', '\''] {
        if let Some(body) = s.strip_prefix(quote) {
            return match body.find(quote) {
                Some(end) => (&body[..end], &body[end + 1..]),
                // Unterminated quote: the rest of the text is the value.
                None => (body, ""),
            };
        }
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Characters that end a shortcode name.
fn ends_tag_name(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '&' | '/' | '[' | ']' | '=')
}

/// A shortcode match located in the scanned text.
#[derive(Debug)]
struct Found<'a> {
    start: usize,
    end: usize,
    code: Shortcode<'a>,
    /// `[[...]]` form: emit the inner text literally.
    escaped: bool,
    /// Opening `[[` without a matching `]]`: a literal `[` precedes the expansion.
    stray_bracket: bool,
}

/// Try to match a shortcode starting at byte `start` (which holds `[`).
fn match_at<'a, F>(text: &'a str, start: usize, is_registered: &F) -> Option<Found<'a>>
where
    F: Fn(&str) -> bool,
{
    let bytes = text.as_bytes();
    let double = bytes.get(start + 1) == Some(&b'[');
    let name_start = start + 1 + usize::from(double);

    let after = &text[name_start..];
    let name_len = after
        .char_indices()
        .find(|&(_, c)| ends_tag_name(c))
        .map_or(after.len(), |(i, _)| i);
    if name_len == 0 {
        return None;
    }
    let tag = &after[..name_len];
    if !is_registered(tag) {
        return None;
    }

    // Attribute text runs to the first `]`; a `/` directly before it self-closes.
    let attr_start = name_start + name_len;
    let close = attr_start + memchr(b']', &bytes[attr_start..])?;
    let self_closing = close > attr_start && bytes[close - 1] == b'/';
    let attr_end = if self_closing { close - 1 } else { close };
    let attrs = parse_attrs(&text[attr_start..attr_end]);

    let mut end = close + 1;
    let mut content = None;
    if !self_closing {
        let closing = format!("[/{tag}]");
        if let Some(offset) = text[end..].find(&closing) {
            content = Some(&text[end..end + offset]);
            end += offset + closing.len();
        }
    }

    let escaped = double && bytes.get(end) == Some(&b']');
    if escaped {
        end += 1;
    }

    Some(Found {
        start,
        end,
        code: Shortcode { tag, attrs, content },
        escaped,
        stray_bracket: double && !escaped,
    })
}

/// Replace every registered shortcode in `text` with the handler's output.
///
/// Text outside shortcodes, including unregistered `[...]` spans, is copied
/// through unchanged.
pub fn replace_shortcodes<F, H>(text: &str, is_registered: F, mut handler: H) -> String
where
    F: Fn(&str) -> bool,
    H: FnMut(&Shortcode<'_>) -> String,
{
    let bytes = text.as_bytes();
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(offset) = memchr(b'[', &bytes[pos..]) {
        let start = pos + offset;
        match match_at(text, start, &is_registered) {
            Some(found) => {
                output.push_str(&text[copied..found.start]);
                if found.escaped {
                    output.push_str(&text[found.start + 1..found.end - 1]);
                } else {
                    if found.stray_bracket {
                        output.push('[');
                    }
                    output.push_str(&handler(&found.code));
                }
                copied = found.end;
                pos = found.end;
            }
            None => pos = start + 1,
        }
    }

    output.push_str(&text[copied..]);
    output
}
